use rocket::http::Status;
use thiserror::Error;
use tracing::{Span, error, warn};

use crate::validation::ToValidationResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        let error_kind = match self {
            AppError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
                "database_error"
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, context = %ctx, "Not found error");
                "not_found_error"
            }
            AppError::UnknownGroup(name) => {
                warn!(group = %name, context = %ctx, "Unknown group error");
                "unknown_group_error"
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
                "internal_error"
            }
        };

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record("error.kind", tracing::field::display(error_kind));
            current_span.record("error.message", tracing::field::display(&message));
        }
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::Database(_) => Status::InternalServerError,
            AppError::NotFound(_) => Status::NotFound,
            AppError::UnknownGroup(_) => Status::UnprocessableEntity,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        self.to_validation_response().respond_to(req)
    }
}
