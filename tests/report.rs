use fondo::report::{PricedTx, Report};
use fondo::store::TxRecord;

fn rec(txid: &str, btc_value: f64) -> TxRecord {
    TxRecord {
        txid: txid.to_string(),
        block_height: 800_000,
        block_time: 1_000,
        btc_value,
    }
}

#[test]
fn pnl_arithmetic() {
    let row = PricedTx::new(rec("aaa", 1.0), 50_000.0, 60_000.0);
    assert_eq!(row.cad_value, 50_000.0);
    assert_eq!(row.cad_current_value, 60_000.0);
    assert_eq!(row.pnl_dollar, 10_000.0);
    assert_eq!(row.pnl_percent, Some(20.0));
}

#[test]
fn zero_cost_basis_has_no_percent() {
    // A zero-credit record must not blow up the percent column
    let row = PricedTx::new(rec("change-only", 0.0), 50_000.0, 60_000.0);
    assert_eq!(row.cad_value, 0.0);
    assert_eq!(row.pnl_dollar, 0.0);
    assert_eq!(row.pnl_percent, None);
}

#[test]
fn losses_are_negative() {
    let row = PricedTx::new(rec("aaa", 2.0), 60_000.0, 45_000.0);
    assert_eq!(row.pnl_dollar, -30_000.0);
    assert_eq!(row.pnl_percent, Some(-25.0));
}

#[test]
fn totals_sum_rows() {
    let rows = vec![
        PricedTx::new(rec("aaa", 1.0), 50_000.0, 60_000.0),
        PricedTx::new(rec("bbb", 0.5), 40_000.0, 60_000.0),
    ];
    let report = Report::new(rows, 60_000.0);

    assert_eq!(report.totals.btc_value, 1.5);
    assert_eq!(report.totals.cad_value, 70_000.0);
    assert_eq!(report.totals.cad_current_value, 90_000.0);
    assert_eq!(report.totals.pnl_dollar, 20_000.0);
    let pct = report.totals.pnl_percent.unwrap();
    assert!((pct - (20_000.0 / 70_000.0 * 100.0)).abs() < 1e-9);
}

#[test]
fn empty_report_has_zero_totals_and_no_percent() {
    let report = Report::new(Vec::new(), 60_000.0);
    assert_eq!(report.totals.btc_value, 0.0);
    assert_eq!(report.totals.pnl_percent, None);
}
