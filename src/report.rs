//! Derived metrics: per-transaction cost basis, current value, and PnL,
//! plus aggregate totals. Pure arithmetic, no I/O.
use crate::store::TxRecord;

/// A stored transaction joined with its acquisition-time price and valued
/// against the live price.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedTx {
    /// The underlying stored record.
    pub record: TxRecord,
    /// BTC/fiat price at the transaction's block time.
    pub price: f64,
    /// Cost basis: `btc_value * price`.
    pub cad_value: f64,
    /// Value at the live price: `btc_value * live_price`.
    pub cad_current_value: f64,
    /// `cad_current_value - cad_value`.
    pub pnl_dollar: f64,
    /// PnL as a percentage of cost basis. `None` when the cost basis is
    /// zero (the division is undefined, not an error).
    pub pnl_percent: Option<f64>,
}

impl PricedTx {
    /// Price `record` at its historical `price` and value it at `live_price`.
    pub fn new(record: TxRecord, price: f64, live_price: f64) -> Self {
        let cad_value = record.btc_value * price;
        let cad_current_value = record.btc_value * live_price;
        let pnl_dollar = cad_current_value - cad_value;
        Self {
            record,
            price,
            cad_value,
            cad_current_value,
            pnl_dollar,
            pnl_percent: percent_of_basis(pnl_dollar, cad_value),
        }
    }
}

/// Sums of the per-transaction values across the whole history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    /// Total BTC held.
    pub btc_value: f64,
    /// Total cost basis.
    pub cad_value: f64,
    /// Total value at the live price.
    pub cad_current_value: f64,
    /// Total PnL in fiat.
    pub pnl_dollar: f64,
    /// Aggregate PnL percent, `None` when the total cost basis is zero.
    pub pnl_percent: Option<f64>,
}

/// The engine's full output: priced rows (most recent first), the live
/// price they were valued at, and aggregate totals.
#[derive(Debug, Clone)]
pub struct Report {
    /// Priced transactions, descending block time.
    pub rows: Vec<PricedTx>,
    /// Live BTC/fiat price used for current values.
    pub live_price: f64,
    /// Aggregate sums over `rows`.
    pub totals: Totals,
}

impl Report {
    /// Assemble a report and compute its totals.
    pub fn new(rows: Vec<PricedTx>, live_price: f64) -> Self {
        let mut totals = Totals::default();
        for row in &rows {
            totals.btc_value += row.record.btc_value;
            totals.cad_value += row.cad_value;
            totals.cad_current_value += row.cad_current_value;
            totals.pnl_dollar += row.pnl_dollar;
        }
        totals.pnl_percent = percent_of_basis(totals.pnl_dollar, totals.cad_value);
        Self {
            rows,
            live_price,
            totals,
        }
    }
}

fn percent_of_basis(pnl: f64, basis: f64) -> Option<f64> {
    if basis == 0.0 {
        None
    } else {
        Some(pnl / basis * 100.0)
    }
}
