//! Database migrations, initialization and seeding.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {0}: {1}")]
    Read(String, std::io::Error),
    #[error("Failed to apply seed file: {0}")]
    Apply(#[from] sqlx::Error),
}

/// Initialize the SQLite database with schema and pragmas.
pub async fn init_db(db_path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool).await?;

    info!(path = %db_path, "Database initialized");
    Ok(pool)
}

/// Run all database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

/// Apply the SQL file at `seed_path` if no category exists yet.
///
/// Returns whether the seed ran. The whole file goes to SQLite as one batch,
/// so string literals may contain semicolons.
pub async fn seed_if_empty(pool: &SqlitePool, seed_path: &str) -> Result<bool, SeedError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(categories = existing, "Store already populated, skipping seed");
        return Ok(false);
    }

    let sql = std::fs::read_to_string(seed_path)
        .map_err(|e| SeedError::Read(seed_path.to_string(), e))?;

    let mut tx = pool.begin().await?;
    (&mut *tx).execute(sql.as_str()).await?;
    tx.commit().await?;

    info!(path = %seed_path, "Seed applied");
    Ok(true)
}

/// Configure SQLite pragmas for reliability under concurrent requests.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    tracing::debug!(journal_mode = %journal_mode, "SQLite journal mode");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
