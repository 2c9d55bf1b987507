use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub async fn create_pool(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to the database")
}

/// Idempotent schema setup, run at startup and by the test suite.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS departments (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            description TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS people (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name      TEXT NOT NULL,
            company        TEXT,
            department_id  INTEGER NOT NULL REFERENCES departments (id),
            linkedin       TEXT,
            social_links   TEXT,
            year_graduated INTEGER,
            description    TEXT,
            photo_url      TEXT
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
