//! HTTP client for mempool.space-compatible explorers, implementing both
//! source traits.
use anyhow::Context;
use async_trait::async_trait;
use log::debug;

use crate::{
    error::TrackerError,
    price_source::PriceSource,
    tx_source::{AddressTx, TxSource},
};

/// Public mempool.space API base.
pub const MEMPOOL_SPACE: &str = "https://mempool.space/api";

/// Client for the address-txs, historical-price, and live-price endpoints.
pub struct MempoolClient {
    client: reqwest::Client,
    base_url: String,
}

impl MempoolClient {
    /// Client against an arbitrary base URL (self-hosted instance, test server).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client against the public mempool.space API.
    pub fn mempool_space() -> Self {
        Self::new(MEMPOOL_SPACE)
    }

    async fn get_json(&self, url: &str) -> anyhow::Result<serde_json::Value> {
        debug!("GET {url}");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;
        let status = res.status();
        if !status.is_success() {
            return Err(TrackerError::NetworkFailure {
                status: status.as_u16(),
            }
            .into());
        }
        res.json().await.with_context(|| format!("decode {url}"))
    }
}

#[async_trait]
impl TxSource for MempoolClient {
    async fn address_txs(
        &self,
        address: &str,
        after_txid: Option<&str>,
    ) -> anyhow::Result<Vec<AddressTx>> {
        let mut url = format!("{}/address/{address}/txs", self.base_url);
        if let Some(txid) = after_txid {
            url.push_str(&format!("?after_txid={txid}"));
        }
        let body = self.get_json(&url).await?;
        serde_json::from_value(body).context("decode address txs page")
    }
}

#[async_trait]
impl PriceSource for MempoolClient {
    async fn historical_price(&self, currency: &str, timestamp: u64) -> anyhow::Result<f64> {
        let url = format!(
            "{}/v1/historical-price?currency={currency}&timestamp={timestamp}",
            self.base_url
        );
        let body = self.get_json(&url).await?;
        body["prices"][0][currency]
            .as_f64()
            .ok_or_else(|| {
                TrackerError::PriceUnavailable {
                    reason: format!("no {currency} price for timestamp {timestamp}"),
                }
                .into()
            })
    }

    async fn live_price(&self, currency: &str) -> anyhow::Result<f64> {
        let url = format!("{}/v1/prices", self.base_url);
        let body = self.get_json(&url).await?;
        body[currency].as_f64().ok_or_else(|| {
            TrackerError::PriceUnavailable {
                reason: format!("no live {currency} price in payload"),
            }
            .into()
        })
    }
}
