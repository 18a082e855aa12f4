//! Observability callbacks: the engine reports what it did, you pick the sink.
use async_trait::async_trait;

/// Why a sync pass stopped paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEnd {
    /// The source returned an empty page.
    Exhausted,
    /// A page contained no transactions we had not already stored.
    NoNewRecords,
    /// The source failed (e.g. non-success HTTP status); merged pages survive.
    SourceError,
}

/// Engine events. Every method has a no-op default; implement only what you
/// want to observe.
#[async_trait]
pub trait TrackerHooks: Send + Sync {
    /// A page was fetched: `fetched` transactions on the wire, `fresh` of
    /// them new to the store (confirmed and not yet seen).
    async fn on_page_fetched(&self, _page: usize, _fetched: usize, _fresh: usize) {}

    /// `count` new records were committed together with the advanced cursor.
    async fn on_records_merged(&self, _count: usize) {}

    /// Pagination stopped.
    async fn on_sync_ended(&self, _reason: SyncEnd) {}

    /// A historical price was served from the cache, no network call made.
    async fn on_price_cache_hit(&self, _block_time: u64) {}

    /// A historical price was fetched from the source and cached.
    async fn on_price_fetched(&self, _block_time: u64, _price: f64) {}
}

/// Hooks that observe nothing.
pub struct NoHooks;

#[async_trait]
impl TrackerHooks for NoHooks {}
