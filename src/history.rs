use crate::errors::StoreError;
use crate::models::{HistoryEntry, HistoryRecord};
use crate::store::{HISTORY_ROOT, LedgerStore};
use tracing::warn;

pub async fn push_history(
    store: &dyn LedgerStore,
    record: &HistoryRecord,
) -> Result<String, StoreError> {
    let value = serde_json::to_value(record)?;
    store.push(HISTORY_ROOT, value).await
}

/// All history records, newest first. Records that no longer decode are skipped.
pub async fn list_history(store: &dyn LedgerStore) -> Result<Vec<HistoryEntry>, StoreError> {
    let Some(root) = store.get(HISTORY_ROOT).await? else {
        return Ok(Vec::new());
    };
    let Some(children) = root.as_object() else {
        warn!("history root is not an object");
        return Ok(Vec::new());
    };

    let mut entries: Vec<HistoryEntry> = children
        .iter()
        .filter_map(|(id, raw)| match serde_json::from_value::<HistoryRecord>(raw.clone()) {
            Ok(record) => Some(HistoryEntry {
                id: id.clone(),
                record,
            }),
            Err(err) => {
                warn!(%id, "skipping malformed history record: {err}");
                None
            }
        })
        .collect();
    entries.sort_by(|a, b| b.record.timestamp.cmp(&a.record.timestamp));
    Ok(entries)
}
