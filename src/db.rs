use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::errors::AppError;
use crate::models::datatable::DtTable;
use crate::models::room::{self, NewRoom};

pub type DbPool = SqlitePool;

const ROOMS_SEED: &str = include_str!("../data/seed/rooms.json");

/// Directory that must exist before SQLite can create the database file.
/// `None` for in-memory URLs and bare file names.
pub fn database_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or("");
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    PathBuf::from(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
}

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Seed the rooms table from the bundled JSON file (no-op when already populated).
pub async fn seed(pool: &DbPool) -> Result<usize, AppError> {
    let rooms: Vec<NewRoom> = serde_json::from_str(ROOMS_SEED)
        .map_err(|e| AppError::Decode(format!("bad rooms seed JSON: {e}")))?;
    let created = room::seed(pool, &rooms).await?;
    if created > 0 {
        log::info!("Seed rooms: created={created}");
    }
    Ok(created)
}

/// Mapped database columns that do not exist in `table`.
/// An empty result means every mapping (and the sort column) is valid.
pub async fn missing_columns(pool: &DbPool, table: &DtTable) -> Result<Vec<&'static str>, sqlx::Error> {
    let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(table.name)
        .fetch_all(pool)
        .await?;

    let mut wanted = table.db_columns();
    if !wanted.contains(&table.sort_column.db_name) {
        wanted.push(table.sort_column.db_name);
    }
    Ok(wanted
        .into_iter()
        .filter(|c| !present.iter().any(|p| p == c))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_dir_for_file_urls() {
        assert_eq!(database_dir("sqlite://data/rooms.db"), Some(PathBuf::from("data")));
        assert_eq!(database_dir("sqlite:/tmp/x/rooms.db?mode=rwc"), Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn database_dir_none_for_memory_and_bare_names() {
        assert_eq!(database_dir("sqlite::memory:"), None);
        assert_eq!(database_dir("sqlite://rooms.db"), None);
    }

    #[test]
    fn bundled_seed_parses() {
        let rooms: Vec<NewRoom> = serde_json::from_str(ROOMS_SEED).unwrap();
        assert!(!rooms.is_empty());
        assert!(rooms.iter().any(|r| r.topic.is_none()));
    }
}
