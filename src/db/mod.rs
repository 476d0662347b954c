//! SQLite persistence for employees and attendance.
//!
//! Query functions take a borrowed connection so the caller decides the
//! session scope: a pooled checkout for reads and single-statement writes,
//! a transaction when several writes must commit together.

pub mod attendance;
pub mod employee;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    // Writers queue on the database lock instead of failing straight away;
    // under WAL, readers never hold them up.
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    info!(database_url, "Database ready");
    Ok(pool)
}

/// Creates tables and indexes that do not exist yet. Existing tables are
/// left untouched.
async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_pool;

    #[actix_web::test]
    async fn schema_creation_is_idempotent() {
        let (pool, _dir) = temp_pool().await;
        super::create_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('employees', 'attendance') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec![("attendance".to_string(),), ("employees".to_string(),)]
        );
    }
}
