use fondo::store::{PriceStore, SqlitePriceStore, SqliteTxStore, TxRecord, TxStore};
use tempfile::NamedTempFile;

fn rec(txid: &str, block_time: u64, btc_value: f64) -> TxRecord {
    TxRecord {
        txid: txid.to_string(),
        block_height: 800_000,
        block_time,
        btc_value,
    }
}

#[tokio::test]
async fn tx_store_roundtrips() -> anyhow::Result<()> {
    let tmp = NamedTempFile::new()?;
    let store = SqliteTxStore::new(tmp.path())?;

    // Defaults on a fresh DB
    assert!(store.load_all().await?.is_empty(), "fresh DB has no records");
    assert!(store.known_txids().await?.is_empty());
    assert!(store.cursor().await?.is_none(), "fresh DB has no cursor");

    // Commit a batch with its cursor; both land together
    let batch = vec![rec("aaa", 1_000, 1.5), rec("bbb", 2_000, 0.25)];
    store.commit(&batch, "bbb").await?;

    let all = store.load_all().await?;
    assert_eq!(all.len(), 2);
    // Most recent block time first
    assert_eq!(all[0].txid, "bbb");
    assert_eq!(all[1].txid, "aaa");
    assert_eq!(store.cursor().await?.as_deref(), Some("bbb"));

    let known = store.known_txids().await?;
    assert!(known.contains("aaa") && known.contains("bbb"));

    store.set_cursor("aaa").await?;
    assert_eq!(store.cursor().await?.as_deref(), Some("aaa"));

    Ok(())
}

#[tokio::test]
async fn merge_never_overwrites() -> anyhow::Result<()> {
    let tmp = NamedTempFile::new()?;
    let store = SqliteTxStore::new(tmp.path())?;

    store.merge(&[rec("aaa", 1_000, 1.5)]).await?;
    // Same txid, different fields: must be ignored, not applied
    store.merge(&[rec("aaa", 9_999, 42.0)]).await?;

    let all = store.load_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].block_time, 1_000);
    assert_eq!(all[0].btc_value, 1.5);

    Ok(())
}

#[tokio::test]
async fn schema_creation_is_idempotent() -> anyhow::Result<()> {
    let tmp = NamedTempFile::new()?;
    let store = SqliteTxStore::new(tmp.path())?;
    store.commit(&[rec("aaa", 1_000, 1.0)], "aaa").await?;
    drop(store);

    // Re-opening the same file must not clobber existing data
    let store = SqliteTxStore::new(tmp.path())?;
    assert_eq!(store.load_all().await?.len(), 1);
    assert_eq!(store.cursor().await?.as_deref(), Some("aaa"));

    Ok(())
}

#[tokio::test]
async fn price_store_first_writer_wins() -> anyhow::Result<()> {
    let tmp = NamedTempFile::new()?;
    let store = SqlitePriceStore::new(tmp.path())?;

    assert!(store.get(1_000).await?.is_none(), "fresh DB has no prices");

    store.put(1_000, 50_000.0).await?;
    // Second write for the same timestamp is silently ignored
    store.put(1_000, 99_999.0).await?;
    assert_eq!(store.get(1_000).await?, Some(50_000.0));

    store.put(2_000, 60_000.0).await?;
    assert_eq!(store.get(2_000).await?, Some(60_000.0));

    Ok(())
}
