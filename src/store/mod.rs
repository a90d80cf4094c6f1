//! Persistent key/value store backing the configuration panels.
//!
//! Values are JSON blobs keyed by (namespace, key); each panel uses its own
//! widget id as namespace. The navigation controller never touches this
//! directly, it only hands the handle to widgets through the mount context.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::{Row, SqlitePool};
use std::path::Path;

const SCHEMA_VERSION: i64 = 1;

/// Cheaply cloneable handle to the SQLite-backed blob store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if needed) the store at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self> {
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| format!("Failed to open store: {}", db_path.display()))?;

        // Configure SQLite for better concurrency and safety
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .context("Failed to enable WAL mode")?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .context("Failed to set synchronous mode")?;

        init_schema(&pool).await?;
        log::debug!("opened store: {}", db_path.display());
        Ok(Self { pool })
    }

    /// In-memory store for testing.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory store")?;
        init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Fetch and deserialize the value under (namespace, key), or `None` if
    /// absent.
    pub async fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Result<Option<T>> {
        let row = sqlx::query("SELECT value FROM kv WHERE namespace = ? AND key = ?")
            .bind(namespace)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read {namespace}/{key}"))?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("value")?;
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value under {namespace}/{key}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and upsert the value under (namespace, key).
    pub async fn put<T: Serialize>(&self, namespace: &str, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {namespace}/{key}"))?;

        sqlx::query(
            "INSERT INTO kv (namespace, key, value) VALUES (?, ?, ?)
             ON CONFLICT (namespace, key) DO UPDATE SET value = excluded.value",
        )
        .bind(namespace)
        .bind(key)
        .bind(raw)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to write {namespace}/{key}"))?;
        Ok(())
    }

    pub async fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE namespace = ? AND key = ?")
            .bind(namespace)
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {namespace}/{key}"))?;
        Ok(())
    }

    /// All keys stored under a namespace, sorted.
    pub async fn keys(&self, namespace: &str) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM kv WHERE namespace = ? ORDER BY key")
            .bind(namespace)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list keys under {namespace}"))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("key").map_err(Into::into))
            .collect()
    }

    pub async fn schema_version(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT version FROM store_meta")
            .fetch_one(&self.pool)
            .await
            .context("Failed to read store schema version")
    }
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS kv (
            namespace TEXT NOT NULL,
            key       TEXT NOT NULL,
            value     TEXT NOT NULL,
            PRIMARY KEY (namespace, key)
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create kv table")?;

    sqlx::query("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL)")
        .execute(pool)
        .await
        .context("Failed to create store_meta table")?;

    let version: Option<i64> = sqlx::query_scalar("SELECT version FROM store_meta")
        .fetch_optional(pool)
        .await
        .context("Failed to read schema version")?;

    match version {
        None => {
            sqlx::query("INSERT INTO store_meta (version) VALUES (?)")
                .bind(SCHEMA_VERSION)
                .execute(pool)
                .await
                .context("Failed to stamp schema version")?;
        }
        Some(v) if v == SCHEMA_VERSION => {}
        Some(v) => bail!("unsupported store schema version {v} (expected {SCHEMA_VERSION})"),
    }
    Ok(())
}
