use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        email           TEXT    NOT NULL,
        hashed_password TEXT    NOT NULL,
        is_active       INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS ix_users_email ON users (email)"#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        title       TEXT    NOT NULL,
        description TEXT    NULL,
        owner_id    INTEGER NOT NULL REFERENCES users (id)
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS ix_items_owner_id ON items (owner_id)"#,
];

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the SQLite pool.
///
/// An in-memory database lives only as long as its connection, so it gets a
/// single connection that is never recycled. File databases run in WAL mode and
/// wait on locks held by concurrent writers instead of failing.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {}", database_url))?;

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(
                connect_options
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(BUSY_TIMEOUT),
            )
            .await
    };

    pool.with_context(|| format!("connect to database {}", database_url))
}

/// Creates tables and indexes if they are missing. Safe to run on every start.
pub async fn init_schema(db: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(db)
            .await
            .context("create schema")?;
    }
    tracing::debug!("database schema ready");
    Ok(())
}
