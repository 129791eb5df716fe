//! Shared test infrastructure.
//!
//! Every test gets its own in-memory SQLite database with migrations applied.
//! The pool is pinned to a single connection that never expires, because
//! each new `:memory:` connection would otherwise open an empty database.

#![allow(dead_code)]

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use roomtable::db;
use roomtable::models::room::{self, NewRoom};

pub struct TestDb {
    pool: SqlitePool,
}

impl TestDb {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fresh database with schema and no rows.
pub async fn setup_test_db() -> TestDb {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("memory url");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open test DB");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    TestDb { pool }
}

/// Insert rooms in the given order.
pub async fn insert_rooms(pool: &SqlitePool, rooms: &[(&str, Option<&str>)]) {
    for (name, topic) in rooms {
        let r = NewRoom { name: name.to_string(), topic: topic.map(str::to_string) };
        room::create(pool, &r).await.expect("insert room");
    }
}

/// `n` rooms named "Room 00", "Room 01", ... inserted in reverse order so
/// that result order can only come from ORDER BY.
pub async fn insert_numbered_rooms(pool: &SqlitePool, n: usize) {
    for i in (0..n).rev() {
        let r = NewRoom { name: format!("Room {i:02}"), topic: Some(format!("topic {i}")) };
        room::create(pool, &r).await.expect("insert room");
    }
}

/// A small fixed set used by the search tests.
pub const SEARCH_ROOMS: &[(&str, Option<&str>)] = &[
    ("Garden", Some("Vegetables")),
    ("Garage", Some("Bikes")),
    ("Gym", None),
    ("Kitchen", Some("Cooking")),
    ("Lounge", Some("Garrulous chat")),
    ("100% Juice", Some("Drinks")),
    ("1000 Club", Some("Numbers")),
];
