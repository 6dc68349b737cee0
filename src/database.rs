use std::time::Duration;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connects and brings the schema up to date.
pub async fn get_database_connection(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database connected and migrations applied");
    Ok(db)
}
