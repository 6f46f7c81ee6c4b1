//! Database migration utilities

use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};

use crate::config::Config;

/// Create the database if missing and run all migrations
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if !Sqlite::database_exists(url).await? {
        tracing::info!("Creating database {}", url);
        Sqlite::create_database(url).await?;
    }

    let pool = SqlitePool::connect(url).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Database migrated");

    Ok(())
}

/// Drop the database if it exists and recreate it with migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if Sqlite::database_exists(url).await? {
        Sqlite::drop_database(url).await?;
        tracing::info!("Dropped database {}", url);
    }

    migrate(config).await
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
