// src/store.rs
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::types::MetricRecord;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid table name: {0:?}")]
    BadTable(String),
}

#[async_trait::async_trait]
pub trait MetricStore: Send + Sync {
    /// Upsert one record under its (metric_id, ts_ms) key. At-least-once;
    /// writing the same record twice leaves one row.
    async fn put(&self, rec: &MetricRecord) -> Result<(), StoreError>;
}

/// SQLite-backed store. One table, primary key (metric_id, ts_ms).
pub struct SqliteStore {
    pool: SqlitePool,
    table_name: String,
}

// Table names are interpolated into SQL, so they must be plain identifiers.
fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl SqliteStore {
    pub async fn connect(database_url: &str, table_name: &str) -> Result<Self, StoreError> {
        if !is_identifier(table_name) {
            return Err(StoreError::BadTable(table_name.to_string()));
        }
        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Single connection: the job is sequential, and an in-memory database
        // must not be split across pooled connections.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table_name} (\
             metric_id TEXT NOT NULL, \
             ts_ms INTEGER NOT NULL, \
             value TEXT NOT NULL, \
             PRIMARY KEY (metric_id, ts_ms))"
        ))
        .execute(&pool)
        .await?;
        Ok(Self { pool, table_name: table_name.to_string() })
    }

    pub async fn get(&self, metric_id: &str, ts_ms: i64) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(&format!(
            "SELECT value FROM {} WHERE metric_id = ?1 AND ts_ms = ?2",
            self.table_name
        ))
        .bind(metric_id)
        .bind(ts_ms)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(v,)| v))
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (n,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", self.table_name))
                .fetch_one(&self.pool)
                .await?;
        Ok(n)
    }
}

#[async_trait::async_trait]
impl MetricStore for SqliteStore {
    async fn put(&self, rec: &MetricRecord) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "INSERT INTO {} (metric_id, ts_ms, value) VALUES (?1, ?2, ?3) \
             ON CONFLICT(metric_id, ts_ms) DO UPDATE SET value = excluded.value",
            self.table_name
        ))
        .bind(&rec.metric_id)
        .bind(rec.ts_ms)
        .bind(&rec.value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-process store keyed the same way as the real one. Used by tests and
/// probes; tracks raw put calls so idempotence is assertable.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    records: HashMap<(String, i64), String>,
    puts: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn puts(&self) -> usize {
        self.inner.lock().unwrap().puts
    }

    pub fn get(&self, metric_id: &str, ts_ms: i64) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(&(metric_id.to_string(), ts_ms))
            .cloned()
    }
}

#[async_trait::async_trait]
impl MetricStore for MemoryStore {
    async fn put(&self, rec: &MetricRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.puts += 1;
        inner
            .records
            .insert((rec.metric_id.clone(), rec.ts_ms), rec.value.clone());
        Ok(())
    }
}
