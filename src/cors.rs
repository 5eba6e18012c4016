use rocket::http::{Header, Method};
use rocket::{
    Request, Response,
    fairing::{Fairing, Info, Kind},
};

/// Attaches the permissive CORS headers the wire contract requires.
/// Every response allows any origin; preflight responses additionally
/// advertise the allowed methods, headers, and a cache max-age.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));

        if request.method() == Method::Options {
            response.set_header(Header::new(
                "Access-Control-Allow-Methods",
                "GET, POST, PUT, DELETE, OPTIONS",
            ));
            response.set_header(Header::new(
                "Access-Control-Allow-Headers",
                "Content-Type, X-User-Id",
            ));
            response.set_header(Header::new("Access-Control-Max-Age", "86400"));
        }
    }
}
