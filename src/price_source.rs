//! Abstraction for fiat price lookups (historical and live).
use async_trait::async_trait;

/// Provider of BTC/fiat prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Price of one BTC in `currency` at the given unix timestamp.
    /// Historical prices are immutable; callers cache them.
    async fn historical_price(&self, currency: &str, timestamp: u64) -> anyhow::Result<f64>;

    /// Current price of one BTC in `currency`. Never cached.
    async fn live_price(&self, currency: &str) -> anyhow::Result<f64>;
}
