use crate::bucket::BucketKey;
use crate::errors::StoreError;
use crate::history::push_history;
use crate::models::{HistoryRecord, Quantity, WasteEntry, quantity_value, round_quantity};
use crate::store::{LedgerStore, WASTE_ROOT, ledger_path};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub failed: Vec<String>,
    pub history_id: Option<String>,
}

/// Adds every entry onto the quantity already stored in `bucket`.
///
/// Each item is its own read-then-write; a failure is logged and the next
/// item is still attempted. Nothing is rolled back, and calling twice with
/// the same entries adds them twice. One history record is pushed for the
/// whole batch, whatever happened to the individual items.
pub async fn save_waste_items(
    store: &dyn LedgerStore,
    bucket: &BucketKey,
    entries: &[WasteEntry],
    timestamp_ms: i64,
) -> SaveReport {
    let mut report = SaveReport::default();

    for entry in entries {
        match add_quantity(store, bucket, &entry.product, entry.amount).await {
            Ok(total) => {
                info!(%bucket, item = %entry.product, added = entry.amount, total, "waste saved");
                report.saved.push(entry.product.clone());
            }
            Err(err) => {
                error!(%bucket, item = %entry.product, "failed to save waste item: {err}");
                report.failed.push(entry.product.clone());
            }
        }
    }

    let mut waste_items: BTreeMap<String, Quantity> = BTreeMap::new();
    for entry in entries {
        let sum = waste_items.entry(entry.product.clone()).or_default();
        *sum = round_quantity(*sum + entry.amount);
    }
    let record = HistoryRecord {
        date: bucket.to_string(),
        waste_items,
        timestamp: timestamp_ms,
    };
    match push_history(store, &record).await {
        Ok(id) => report.history_id = Some(id),
        Err(err) => error!(%bucket, "failed to record history: {err}"),
    }

    report
}

/// Reads the stored quantity (0 when absent) and writes back the sum.
pub async fn add_quantity(
    store: &dyn LedgerStore,
    bucket: &BucketKey,
    item: &str,
    amount: Quantity,
) -> Result<Quantity, StoreError> {
    let path = ledger_path(&[WASTE_ROOT, bucket.as_str(), item])?;
    let current = read_quantity(store, &path).await?.unwrap_or(0.0);
    let total = round_quantity(current + amount);
    store.set(&path, quantity_value(total)).await?;
    Ok(total)
}

pub async fn read_quantity(
    store: &dyn LedgerStore,
    path: &str,
) -> Result<Option<Quantity>, StoreError> {
    match store.get(path).await? {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| StoreError::UnexpectedValue {
                path: path.to_string(),
                value,
            }),
    }
}
