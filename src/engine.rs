//! Orchestrator for the tracker flow:
//! 1) pull new address transactions page by page, dedup, commit per page,
//! 2) resolve a historical price per block timestamp through the cache,
//! 3) value the history against the live price.
use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context;
use bitcoin::Amount;
use log::{debug, warn};

use crate::{
    config::TrackerConfig,
    hooks::{SyncEnd, TrackerHooks},
    price_source::PriceSource,
    report::{PricedTx, Report},
    store::{PriceStore, TxRecord, TxStore},
    tx_source::{AddressTx, TxSource},
};

/// Pause between page requests, respecting the explorer's implicit rate limit.
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Core engine. `S` = transaction store, `P` = price cache, `T` = transaction
/// source, `Q` = price source, `H` = observability hooks.
pub struct Tracker<S, P, T, Q, H> {
    config: TrackerConfig,
    tx_store: S,
    price_store: P,
    txs: T,
    prices: Q,
    hooks: H,
    page_delay: Duration,
}

impl<S, P, T, Q, H> Tracker<S, P, T, Q, H>
where
    S: TxStore + 'static,
    P: PriceStore + 'static,
    T: TxSource + 'static,
    Q: PriceSource + 'static,
    H: TrackerHooks + 'static,
{
    /// Create a new engine over a validated config, the two stores, the two
    /// remote sources, and observability hooks.
    pub fn new(config: TrackerConfig, tx_store: S, price_store: P, txs: T, prices: Q, hooks: H) -> Self {
        Self {
            config,
            tx_store,
            price_store,
            txs,
            prices,
            hooks,
            page_delay: PAGE_DELAY,
        }
    }

    /// Override the inter-page pacing delay (tests set this to zero).
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Bring the transaction store up to date with the remote source.
    ///
    /// Pages are requested after the stored cursor; each page that yields new
    /// records is committed together with its cursor advance, so a failure on
    /// a later page keeps everything merged so far. A source error or an
    /// empty page ends the pass cleanly. Returns the full ordered history
    /// from the store, not just the new batch.
    ///
    /// # Errors
    /// Returns an error only if the store itself fails; remote failures end
    /// pagination without unwinding.
    pub async fn sync_transactions(&self) -> anyhow::Result<Vec<TxRecord>> {
        let mut cursor = self.tx_store.cursor().await?;
        let mut seen = self.tx_store.known_txids().await?;

        let mut page_index = 0usize;
        loop {
            let page = match self
                .txs
                .address_txs(&self.config.address, cursor.as_deref())
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    warn!("address txs page {page_index} failed, ending pass: {err:#}");
                    self.hooks.on_sync_ended(SyncEnd::SourceError).await;
                    break;
                }
            };
            if page.is_empty() {
                self.hooks.on_sync_ended(SyncEnd::Exhausted).await;
                break;
            }

            let fresh = self.extract_fresh(&page, &mut seen);
            debug!(
                "page {page_index}: {} txs on the wire, {} fresh",
                page.len(),
                fresh.len()
            );
            self.hooks
                .on_page_fetched(page_index, page.len(), fresh.len())
                .await;

            // No new records means the remote overlaps what we already hold;
            // the cursor stays at the last page that contributed.
            if fresh.is_empty() {
                self.hooks.on_sync_ended(SyncEnd::NoNewRecords).await;
                break;
            }

            let Some(last) = page.last() else { break };
            let next_cursor = last.txid.clone();
            self.tx_store
                .commit(&fresh, &next_cursor)
                .await
                .with_context(|| format!("commit page {page_index}"))?;
            self.hooks.on_records_merged(fresh.len()).await;

            cursor = Some(next_cursor);
            page_index += 1;
            tokio::time::sleep(self.page_delay).await;
        }

        self.tx_store.load_all().await
    }

    /// Filter one wire page down to records worth storing: not seen before
    /// and confirmed. The credited value is the sum of outputs paying the
    /// tracked address, converted from satoshis to whole BTC. A transaction
    /// whose matching outputs sum to zero is still recorded.
    fn extract_fresh(&self, page: &[AddressTx], seen: &mut HashSet<String>) -> Vec<TxRecord> {
        let mut fresh = Vec::new();
        for tx in page {
            if seen.contains(&tx.txid) {
                continue;
            }
            let (Some(block_height), Some(block_time)) =
                (tx.status.block_height, tx.status.block_time)
            else {
                // Unconfirmed: not final, leave it for a later pass.
                continue;
            };
            let sats: u64 = tx
                .vout
                .iter()
                .filter(|out| out.scriptpubkey_address.as_deref() == Some(&self.config.address))
                .map(|out| out.value)
                .sum();
            seen.insert(tx.txid.clone());
            fresh.push(TxRecord {
                txid: tx.txid.clone(),
                block_height,
                block_time,
                btc_value: Amount::from_sat(sats).to_btc(),
            });
        }
        fresh
    }

    /// Resolve the BTC/fiat price at `block_time`, consulting the cache
    /// before the network. Cached prices never trigger a remote call.
    ///
    /// # Errors
    /// Propagates `NetworkFailure`/`PriceUnavailable` from the source and
    /// any cache failure.
    pub async fn resolve_price(&self, block_time: u64) -> anyhow::Result<f64> {
        if let Some(price) = self.price_store.get(block_time).await? {
            self.hooks.on_price_cache_hit(block_time).await;
            return Ok(price);
        }
        let price = self
            .prices
            .historical_price(&self.config.currency, block_time)
            .await
            .with_context(|| format!("historical price @{block_time}"))?;
        self.price_store.put(block_time, price).await?;
        self.hooks.on_price_fetched(block_time, price).await;
        Ok(price)
    }

    /// Current BTC/fiat price. Always a fresh network call, never cached.
    pub async fn live_price(&self) -> anyhow::Result<f64> {
        self.prices
            .live_price(&self.config.currency)
            .await
            .context("live price")
    }

    /// Full pass: sync transactions, resolve a price per record, fetch the
    /// live price, and return the priced history with aggregate totals.
    pub async fn refresh(&self) -> anyhow::Result<Report> {
        let records = self.sync_transactions().await?;
        let live_price = self.live_price().await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let price = self.resolve_price(record.block_time).await?;
            rows.push(PricedTx::new(record, price, live_price));
        }
        Ok(Report::new(rows, live_price))
    }
}
