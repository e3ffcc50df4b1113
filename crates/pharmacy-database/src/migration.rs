//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use pharmacy_core::error::{AppError, ErrorKind};
use pharmacy_core::result::AppResult;

/// Apply every migration under `migrations/` not yet recorded in the database.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!(count = migrator.iter().count(), "Schema migrations applied");
    Ok(())
}
