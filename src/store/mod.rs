//! Persistence interfaces used by the engine
//! (transaction history, resumption cursor, historical price cache).
use std::collections::HashSet;

use async_trait::async_trait;

/// A confirmed transaction crediting the tracked address.
#[derive(Debug, Clone, PartialEq)]
pub struct TxRecord {
    /// Transaction id, the unique key.
    pub txid: String,
    /// Height of the containing block.
    pub block_height: u64,
    /// Unix timestamp of the containing block.
    pub block_time: u64,
    /// Net amount credited to the tracked address, in whole BTC.
    pub btc_value: f64,
}

/// Durable transaction set plus the pagination resumption cursor.
/// Records are written once and never updated or deleted.
#[async_trait]
pub trait TxStore: Send + Sync {
    /// Every stored record, most recent block time first. An empty store
    /// yields an empty vec, never an error.
    async fn load_all(&self) -> anyhow::Result<Vec<TxRecord>>;

    /// All stored txids, for O(1) dedup during pagination.
    async fn known_txids(&self) -> anyhow::Result<HashSet<String>>;

    /// Insert records whose txid is not already present. Existing records
    /// are never overwritten; merging the same batch twice is a no-op.
    async fn merge(&self, records: &[TxRecord]) -> anyhow::Result<()>;

    /// Last-seen txid of the most recent successful pass, if any.
    async fn cursor(&self) -> anyhow::Result<Option<String>>;

    /// Overwrite the resumption cursor.
    async fn set_cursor(&self, txid: &str) -> anyhow::Result<()>;

    /// Merge `records` and advance the cursor together. Implementations
    /// backed by a database must make this a single transaction so the
    /// cursor can never run ahead of the merged records.
    async fn commit(&self, records: &[TxRecord], cursor: &str) -> anyhow::Result<()> {
        self.merge(records).await?;
        self.set_cursor(cursor).await
    }
}

/// Cache of historical BTC/fiat prices keyed by block timestamp.
/// Historical prices never change, so entries are immutable once written.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Cached price at `block_time`, if present. Never does network I/O.
    async fn get(&self, block_time: u64) -> anyhow::Result<Option<f64>>;

    /// Insert-if-absent. A second write for the same timestamp is silently
    /// ignored (first writer wins).
    async fn put(&self, block_time: u64, price: f64) -> anyhow::Result<()>;
}

// submodules / concrete stores live here
#[cfg(feature = "store-sqlite")]
pub mod sqlite_store;
#[cfg(feature = "store-sqlite")]
pub use sqlite_store::{SqlitePriceStore, SqliteTxStore};
