#[macro_use]
extern crate rocket;

mod api;
mod config;
mod cors;
mod database;
mod db;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;

use api::{
    api_check_in, api_create_athlete, api_create_schedule, api_delete_schedule, api_get_athletes,
    api_get_groups, api_get_schedules, api_preflight, api_update_athlete, api_update_group, health,
    not_found,
};
use config::AppConfig;
use cors::Cors;
use database::apply_schema;
use rocket::{Build, Rocket};
use telemetry::TelemetryFairing;
use telemetry::init_tracing;

use sqlx::SqlitePool;
use tracing::{error, info, warn};

#[launch]
async fn rocket() -> _ {
    init_tracing();

    if let Err(e) = config::load_environment() {
        warn!("Failed to load environment files: {}", e);
    }

    let config = AppConfig::from_env().expect("DATABASE_URL must be set");

    let pool = SqlitePool::connect(&config.database_url)
        .await
        .expect("Failed to connect to SQLite database");

    info!("Applying database schema...");
    match apply_schema(&pool).await {
        Ok(_) => info!("Schema applied successfully"),
        Err(e) => {
            error!("Failed to apply schema: {}", e);
            panic!("Database schema setup failed: {}", e);
        }
    }

    init_rocket(pool).await
}

pub async fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting club tracker");

    rocket::build()
        .manage(pool)
        .mount(
            "/api",
            routes![
                api_get_athletes,
                api_get_groups,
                api_get_schedules,
                api_create_athlete,
                api_create_schedule,
                api_check_in,
                api_update_athlete,
                api_update_group,
                api_delete_schedule,
                api_preflight,
                health,
            ],
        )
        .register("/api", catchers![not_found])
        .attach(TelemetryFairing)
        .attach(Cors)
}
