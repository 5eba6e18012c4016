pub mod schema;

pub use schema::*;

use crate::error::AppError;
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

/// Applies the declarative schema to the store. Every statement is
/// `CREATE TABLE IF NOT EXISTS`, so re-running against an existing
/// database is a no-op.
#[instrument(skip(pool))]
pub async fn apply_schema(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    info!("Applying database schema");

    sqlx::raw_sql(CURRENT_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to apply schema: {}", e)))?;

    Ok(())
}
