//! Throw-away SQLite databases for repository and report tests.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement, Value};

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::db;

/// Files older than this are leftovers of earlier test runs
const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

static TEST_DIR: OnceCell<PathBuf> = OnceCell::new();

/// Test database directory; leftovers of earlier runs are removed on first use.
fn test_dir() -> &'static Path {
    TEST_DIR.get_or_init(|| {
        let dir = std::env::temp_dir().join("hr-backend-tests");
        remove_stale_files(&dir, STALE_AFTER);
        dir
    })
}

/// Delete files in `dir` not modified within `max_age`
fn remove_stale_files(dir: &Path, max_age: Duration) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let now = SystemTime::now();
    for entry in entries.flatten() {
        let stale = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > max_age);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// Fresh database file in the OS temp directory with the full schema.
pub async fn temp_database() -> DatabaseConnection {
    let path = test_dir().join(format!("{}.db", uuid::Uuid::new_v4()));
    db::connect(&path).await.unwrap()
}

/// Run an INSERT and return the new row id.
pub async fn insert(conn: &DatabaseConnection, sql: &str, values: Vec<Value>) -> i64 {
    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            sql,
            values,
        ))
        .await
        .unwrap();
    result.last_insert_id() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_files_are_removed() {
        let dir = std::env::temp_dir().join(format!("hr-backend-sweep-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let old = dir.join("old.db");
        let fresh = dir.join("fresh.db");
        std::fs::write(&old, b"").unwrap();
        std::fs::write(&fresh, b"").unwrap();
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(2 * 60 * 60))
            .unwrap();

        remove_stale_files(&dir, STALE_AFTER);

        assert!(!old.exists());
        assert!(fresh.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
