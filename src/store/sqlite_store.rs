//! Embedded SQLite implementations of the transaction and price stores.
use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::task;

use crate::store::{PriceStore, TxRecord, TxStore};

const CURSOR_KEY: &str = "lastSeenTxid";

/// Transaction history plus a metadata key/value table:
///   transactions(txid TEXT PRIMARY KEY, block_height, block_time, btc_value)
///   metadata(key TEXT PRIMARY KEY, value TEXT NOT NULL)
///
/// Metadata keys used:
///  - lastSeenTxid : resumption cursor for paginated fetches
pub struct SqliteTxStore {
    path: PathBuf,
}

impl SqliteTxStore {
    /// Creates/initializes the SQLite file at `path`. Safe to call on every
    /// startup; schema creation is idempotent.
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let conn = Connection::open(&path)
            .with_context(|| format!("open sqlite at {}", path.display()))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS transactions (
                txid         TEXT PRIMARY KEY,
                block_height INTEGER NOT NULL,
                block_time   INTEGER NOT NULL,
                btc_value    REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS metadata (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { path })
    }

    fn kv_get(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
        let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            let v: String = row.get(0)?;
            Ok(Some(v))
        } else {
            Ok(None)
        }
    }

    fn kv_set(conn: &Connection, key: &str, val: &str) -> anyhow::Result<()> {
        conn.execute(
            "INSERT INTO metadata(key,value) VALUES(?1,?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, val],
        )?;
        Ok(())
    }

    fn insert_ignore(conn: &Connection, records: &[TxRecord]) -> anyhow::Result<()> {
        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO transactions (txid, block_height, block_time, btc_value)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for r in records {
            stmt.execute(params![r.txid, r.block_height, r.block_time, r.btc_value])?;
        }
        Ok(())
    }
}

#[async_trait]
impl TxStore for SqliteTxStore {
    async fn load_all(&self) -> anyhow::Result<Vec<TxRecord>> {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            let mut stmt = conn.prepare(
                "SELECT txid, block_height, block_time, btc_value
                 FROM transactions ORDER BY block_time DESC, txid",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(TxRecord {
                    txid: row.get(0)?,
                    block_height: row.get(1)?,
                    block_time: row.get(2)?,
                    btc_value: row.get(3)?,
                })
            })?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
        .await?
    }

    async fn known_txids(&self) -> anyhow::Result<HashSet<String>> {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            let mut stmt = conn.prepare("SELECT txid FROM transactions")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut out = HashSet::new();
            for r in rows {
                out.insert(r?);
            }
            Ok(out)
        })
        .await?
    }

    async fn merge(&self, records: &[TxRecord]) -> anyhow::Result<()> {
        let path = self.path.clone();
        let records = records.to_vec();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            let tx = conn.unchecked_transaction()?;
            Self::insert_ignore(&conn, &records)?;
            tx.commit()?;
            Ok(())
        })
        .await?
    }

    async fn cursor(&self) -> anyhow::Result<Option<String>> {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            Self::kv_get(&conn, CURSOR_KEY)
        })
        .await?
    }

    async fn set_cursor(&self, txid: &str) -> anyhow::Result<()> {
        let path = self.path.clone();
        let txid = txid.to_string();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            Self::kv_set(&conn, CURSOR_KEY, &txid)
        })
        .await?
    }

    // One transaction for records + cursor: a crash between the two can
    // never leave the cursor ahead of unmerged records.
    async fn commit(&self, records: &[TxRecord], cursor: &str) -> anyhow::Result<()> {
        let path = self.path.clone();
        let records = records.to_vec();
        let cursor = cursor.to_string();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            let tx = conn.unchecked_transaction()?;
            Self::insert_ignore(&conn, &records)?;
            Self::kv_set(&conn, CURSOR_KEY, &cursor)?;
            tx.commit()?;
            Ok(())
        })
        .await?
    }
}

/// Historical price cache:
///   prices(block_time INTEGER PRIMARY KEY, price REAL NOT NULL)
pub struct SqlitePriceStore {
    path: PathBuf,
}

impl SqlitePriceStore {
    /// Creates/initializes the SQLite file at `path` (idempotent schema).
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let conn = Connection::open(&path)
            .with_context(|| format!("open sqlite at {}", path.display()))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS prices (
                block_time INTEGER PRIMARY KEY,
                price      REAL NOT NULL
            );
            "#,
        )?;
        Ok(Self { path })
    }
}

#[async_trait]
impl PriceStore for SqlitePriceStore {
    async fn get(&self, block_time: u64) -> anyhow::Result<Option<f64>> {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            let mut stmt = conn.prepare("SELECT price FROM prices WHERE block_time = ?1")?;
            let mut rows = stmt.query(params![block_time])?;
            if let Some(row) = rows.next()? {
                let p: f64 = row.get(0)?;
                Ok(Some(p))
            } else {
                Ok(None)
            }
        })
        .await?
    }

    async fn put(&self, block_time: u64, price: f64) -> anyhow::Result<()> {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(path)?;
            conn.execute(
                "INSERT OR IGNORE INTO prices (block_time, price) VALUES (?1, ?2)",
                params![block_time, price],
            )?;
            Ok(())
        })
        .await?
    }
}
