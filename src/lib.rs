#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! fondo: a single-address Bitcoin fund tracker.
//!
//! ## What the engine does
//! - Pulls the address's transaction history page by page from an
//!   Esplora-style explorer, resuming after a stored cursor.
//! - Dedups against already-stored txids and commits each page together
//!   with its cursor advance (partial progress always survives).
//! - Resolves a historical fiat price per block timestamp through a
//!   persistent cache (one network call per distinct timestamp, ever).
//! - Values the whole history against the live price and reports
//!   per-transaction and aggregate PnL.
//!
//! ## What you provide
//! - [`TxStore`] + [`PriceStore`]: persistence (SQLite implementations
//!   included), or in-memory ones for tests.
//! - [`TxSource`] + [`PriceSource`]: the remote APIs ([`MempoolClient`]
//!   implements both against mempool.space).
//! - [`TrackerHooks`]: optional observability callbacks ([`NoHooks`] to opt out).
//!
//! ## Minimal usage
//! ```rust,ignore
//! use fondo::prelude::*;
//!
//! async fn run() -> anyhow::Result<()> {
//!     let config = TrackerConfig::from_env()?; // TRACKER_ADDRESS, TRACKER_CURRENCY
//!     let tracker = Tracker::new(
//!         config,
//!         SqliteTxStore::new("txs.db")?,
//!         SqlitePriceStore::new("prices.db")?,
//!         MempoolClient::mempool_space(),
//!         MempoolClient::mempool_space(),
//!         NoHooks,
//!     );
//!     let report = tracker.refresh().await?;
//!     for row in &report.rows {
//!         println!("{} {:.8} BTC pnl {:.2}", row.record.txid, row.record.btc_value, row.pnl_dollar);
//!     }
//!     Ok(())
//! }
//! ```
/// Engine that syncs transactions, resolves prices, and builds the report.
pub mod engine;

/// Traits and wire types for fetching address transaction pages.
pub mod tx_source;

/// Trait for historical and live fiat price lookups.
pub mod price_source;

/// reqwest-backed client for mempool.space-compatible APIs.
pub mod http;

/// Observability callbacks emitted by the engine.
pub mod hooks;

/// Tracked address and currency configuration.
pub mod config;

/// Named failure taxonomy.
pub mod error;

/// Derived metrics: priced rows, PnL, totals.
pub mod report;

/// Persistence layer (traits and SQLite implementations).
pub mod store;

// Public re-exports
pub use config::TrackerConfig;
pub use engine::Tracker;
pub use error::TrackerError;
pub use hooks::{NoHooks, TrackerHooks};
pub use http::MempoolClient;
pub use price_source::PriceSource;
pub use report::{PricedTx, Report, Totals};
#[cfg(feature = "store-sqlite")]
pub use store::{SqlitePriceStore, SqliteTxStore};
pub use store::{PriceStore, TxRecord, TxStore};
pub use tx_source::TxSource;

/// Convenience prelude for end users.
pub mod prelude {
    #[cfg(feature = "store-sqlite")]
    pub use crate::{SqlitePriceStore, SqliteTxStore};
    pub use crate::{
        MempoolClient, NoHooks, PriceSource, PriceStore, Report, Tracker, TrackerConfig,
        TrackerError, TrackerHooks, TxRecord, TxSource, TxStore,
    };
}
