use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::path::Path;

use super::schema::SCHEMA;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Build a sqlite URL for a database file, creating parent directories.
pub fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Open a connection and make sure every HR table exists.
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    let db_url = sqlite_url(db_file)?;
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Idempotent schema bootstrap (`CREATE ... IF NOT EXISTS`)
pub async fn bootstrap_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for statement in SCHEMA {
        conn.execute_unprepared(statement).await?;
    }
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    let conn = connect(db_file).await?;
    tracing::info!("Database ready: {}", db_file.display());
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN.get().expect("DB connection not initialized")
}
