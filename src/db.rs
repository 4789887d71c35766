// Standard library imports
use std::{path::Path, str::FromStr};

// External crate imports
use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// The name of the SQLite table used for ideas.
pub const IDEAS_TABLE: &str = "ideas";

const CREATE_IDEAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS ideas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(200) NOT NULL,
    description TEXT NOT NULL,
    tags_json TEXT NOT NULL DEFAULT '[]',
    likes INTEGER NOT NULL DEFAULT 0,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Opens a connection pool for `database_url`, creating the database file
/// (and its parent directory) if they do not exist yet.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL '{}'", database_url))?
        .create_if_missing(true);

    ensure_parent_dir(options.get_filename())?;

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    tracing::info!(%database_url, max_connections, "Database pool created");
    Ok(pool)
}

/// Single-connection in-memory pool. Every connection to `:memory:` is a
/// separate database, so the pool must never open a second one.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to open in-memory database")?;
    Ok(pool)
}

fn ensure_parent_dir(filename: &Path) -> Result<()> {
    if filename.as_os_str().is_empty() || filename == Path::new(":memory:") {
        return Ok(());
    }
    if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Creates the ideas table if it doesn't exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_IDEAS_TABLE)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to create table '{}'", IDEAS_TABLE))?;
    tracing::info!("Table '{}' is ready.", IDEAS_TABLE);
    Ok(())
}
