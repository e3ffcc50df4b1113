//! `pharmacy migrate`: apply pending schema migrations.

use crate::output;
use pharmacy_core::config::AppConfig;
use pharmacy_core::result::AppResult;
use pharmacy_database::{connection, migration};

/// Connect to the configured database and apply migrations.
pub async fn execute(config: &AppConfig) -> AppResult<()> {
    let pool = connection::connect(&config.database).await?;
    connection::ping(&pool).await?;

    println!("Applying migrations...");
    migration::run_migrations(&pool).await?;
    output::print_success("Schema is up to date.");
    Ok(())
}
