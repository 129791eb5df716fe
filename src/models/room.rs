use serde::Deserialize;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::datatable::{DtColumn, DtTable, SearchMode};

const COLUMNS: &[DtColumn] = &[
    DtColumn::new("name", "name"),
    DtColumn::display_only("topic", "topic"),
];

/// The `rooms` table as the grid sees it.
pub const ROOMS: DtTable = DtTable {
    name: "rooms",
    columns: COLUMNS,
    sort_column: DtColumn::new("name", "name"),
    search_mode: SearchMode::Prefix,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub name: String,
    #[serde(default)]
    pub topic: Option<String>,
}

pub async fn create(pool: &SqlitePool, room: &NewRoom) -> Result<i64, AppError> {
    let id = sqlx::query("INSERT INTO rooms (name, topic) VALUES (?1, ?2)")
        .bind(&room.name)
        .bind(&room.topic)
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Insert `rooms` only when the table is empty. Returns how many were created.
pub async fn seed(pool: &SqlitePool, rooms: &[NewRoom]) -> Result<usize, AppError> {
    let existing = count(pool).await?;
    if existing > 0 {
        log::info!("Rooms already seeded ({existing} rows), skipping");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for room in rooms {
        sqlx::query("INSERT INTO rooms (name, topic) VALUES (?1, ?2)")
            .bind(&room.name)
            .bind(&room.topic)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(rooms.len())
}
