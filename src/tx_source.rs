//! Abstraction for fetching address transaction pages from a block explorer.
use async_trait::async_trait;
use serde::Deserialize;

/// One transaction as reported by the Esplora-style address-txs endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressTx {
    /// Transaction id (hex, opaque to the tracker).
    pub txid: String,
    /// Confirmation status.
    pub status: TxStatus,
    /// Outputs of the transaction.
    #[serde(default)]
    pub vout: Vec<TxOutEntry>,
}

/// Confirmation status of a transaction. Height and time are absent while the
/// transaction is still in the mempool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxStatus {
    /// Whether the transaction is in a block.
    #[serde(default)]
    pub confirmed: bool,
    /// Height of the containing block, if confirmed.
    pub block_height: Option<u64>,
    /// Timestamp of the containing block, if confirmed.
    pub block_time: Option<u64>,
}

/// One output of a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TxOutEntry {
    /// Output value in satoshis.
    pub value: u64,
    /// Receiving address, when the script has one.
    pub scriptpubkey_address: Option<String>,
}

/// Provider of paginated address history.
#[async_trait]
pub trait TxSource: Send + Sync {
    /// Fetch one page of transactions for `address`, anchored after
    /// `after_txid` when resuming. An empty vec means the history is
    /// exhausted; an error means the source could not serve the page
    /// (the engine treats both as the end of the current pass).
    async fn address_txs(
        &self,
        address: &str,
        after_txid: Option<&str>,
    ) -> anyhow::Result<Vec<AddressTx>>;
}
