//! Review of recent buckets and promotion of pending waste to wasted.

use crate::aggregator::read_quantity;
use crate::bucket::{BucketKey, recent_buckets};
use crate::errors::StoreError;
use crate::models::{
    BucketRecord, BucketView, Quantity, WASTED_SUFFIX, quantity_value, round_quantity, wasted_key,
};
use crate::store::{LedgerStore, WASTE_ROOT, ledger_path};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info};

pub const CLOSING_DAYS: u32 = 3;

/// Fetches the closing buckets for `today`. A bucket with no data, or one
/// that could not be read, comes back with `items: None`.
pub async fn load_buckets(store: &dyn LedgerStore, today: NaiveDate) -> Vec<BucketView> {
    let mut views = Vec::new();
    for bucket in recent_buckets(today, CLOSING_DAYS) {
        let items = match fetch_bucket(store, &bucket).await {
            Ok(items) => items,
            Err(err) => {
                error!(%bucket, "failed to load bucket: {err}");
                None
            }
        };
        views.push(BucketView { bucket, items });
    }
    views
}

pub async fn fetch_bucket(
    store: &dyn LedgerStore,
    bucket: &BucketKey,
) -> Result<Option<BucketRecord>, StoreError> {
    let path = ledger_path(&[WASTE_ROOT, bucket.as_str()])?;
    Ok(store.get(&path).await?.map(|value| BucketRecord::decode(&value)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Moved { total: Quantity },
    Missing,
}

/// Moves the whole pending quantity of `item` onto its wasted key.
///
/// Three separate store calls: read wasted, read pending, then remove the
/// pending key and write the sum. A failure between the last two leaves
/// the pending quantity gone and the wasted key unchanged. Wasted keys
/// themselves are never moved.
pub async fn move_to_wasted(
    store: &dyn LedgerStore,
    bucket: &BucketKey,
    item: &str,
) -> Result<MoveOutcome, StoreError> {
    if item.ends_with(WASTED_SUFFIX) {
        info!(%bucket, %item, "wasted lines are read-only, not moving");
        return Ok(MoveOutcome::Missing);
    }

    let pending_path = ledger_path(&[WASTE_ROOT, bucket.as_str(), item])?;
    let wasted_path = ledger_path(&[WASTE_ROOT, bucket.as_str(), &wasted_key(item)])?;

    let wasted = read_quantity(store, &wasted_path).await?.unwrap_or(0.0);
    let Some(pending) = read_quantity(store, &pending_path).await? else {
        info!(%bucket, %item, "nothing pending to move");
        return Ok(MoveOutcome::Missing);
    };

    let total = round_quantity(pending + wasted);
    store.remove(&pending_path).await?;
    store.set(&wasted_path, quantity_value(total)).await?;
    info!(%bucket, %item, total, "moved to wasted");
    Ok(MoveOutcome::Moved { total })
}

/// Checkbox state of the closing screen, shared by all bucket tabs.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    items: BTreeMap<String, bool>,
}

impl Selection {
    pub fn toggle(&mut self, item: &str) -> bool {
        let checked = self.items.entry(item.to_string()).or_insert(false);
        *checked = !*checked;
        *checked
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.items.get(item).copied().unwrap_or(false)
    }

    pub fn selected(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(item, _)| item.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MoveReport {
    pub moved: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<String>,
}

/// Runs the move for every selected item in `bucket`, then clears the
/// selection no matter how the individual moves went.
pub async fn move_selected(
    store: &dyn LedgerStore,
    bucket: &BucketKey,
    selection: &mut Selection,
) -> MoveReport {
    let mut report = MoveReport::default();
    for item in selection.selected() {
        match move_to_wasted(store, bucket, &item).await {
            Ok(MoveOutcome::Moved { .. }) => report.moved.push(item),
            Ok(MoveOutcome::Missing) => report.missing.push(item),
            Err(err) => {
                error!(%bucket, %item, "failed to move to wasted: {err}");
                report.failed.push(item);
            }
        }
    }
    selection.clear();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;
    use serde_json::json;

    fn bucket() -> BucketKey {
        BucketKey::parse("19-10 2SH").unwrap()
    }

    async fn seeded(pairs: &[(&str, serde_json::Value)]) -> FileStore {
        let store = FileStore::in_memory();
        for (key, value) in pairs {
            store
                .set(&format!("wasteItems/19-10 2SH/{key}"), value.clone())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn move_without_prior_wasted_entry() {
        let store = seeded(&[("Fries", json!(4))]).await;
        let outcome = move_to_wasted(&store, &bucket(), "Fries").await.unwrap();

        assert_eq!(outcome, MoveOutcome::Moved { total: 4.0 });
        let stored = store.get("wasteItems/19-10 2SH").await.unwrap().unwrap();
        assert_eq!(stored, json!({ "Fries--wasted": 4 }));
    }

    #[tokio::test]
    async fn move_adds_onto_existing_wasted_quantity() {
        let store = seeded(&[("Fries", json!(4)), ("Fries--wasted", json!(10))]).await;
        move_to_wasted(&store, &bucket(), "Fries").await.unwrap();

        let stored = store.get("wasteItems/19-10 2SH").await.unwrap().unwrap();
        assert_eq!(stored, json!({ "Fries--wasted": 14 }));
    }

    #[tokio::test]
    async fn move_sums_for_a_range_of_quantities() {
        for (pending, wasted) in [(0, 0), (1, 0), (0, 7), (3, 9), (250, 1000)] {
            let store = seeded(&[("Cola", json!(pending)), ("Cola--wasted", json!(wasted))]).await;
            move_to_wasted(&store, &bucket(), "Cola").await.unwrap();

            let record = fetch_bucket(&store, &bucket()).await.unwrap().unwrap();
            assert_eq!(record.wasted("Cola"), Some(f64::from(pending + wasted)));
            assert_eq!(record.pending("Cola"), None);
        }
    }

    #[tokio::test]
    async fn wasted_key_is_never_moved() {
        let store = seeded(&[("Fries--wasted", json!(4))]).await;
        let mut selection = Selection::default();
        selection.toggle("Fries--wasted");

        let report = move_selected(&store, &bucket(), &mut selection).await;

        assert!(report.moved.is_empty());
        assert_eq!(report.missing, vec!["Fries--wasted".to_string()]);
        let stored = store.get("wasteItems/19-10 2SH").await.unwrap().unwrap();
        assert_eq!(stored, json!({ "Fries--wasted": 4 }));
    }

    #[tokio::test]
    async fn fractional_moves_are_rounded() {
        let store = seeded(&[("RW-Bun", json!(0.1)), ("RW-Bun--wasted", json!(0.2))]).await;
        let outcome = move_to_wasted(&store, &bucket(), "RW-Bun").await.unwrap();

        assert_eq!(outcome, MoveOutcome::Moved { total: 0.3 });
        let stored = store.get("wasteItems/19-10 2SH/RW-Bun--wasted").await.unwrap();
        assert_eq!(stored, Some(json!(0.3)));
    }

    #[tokio::test]
    async fn missing_pending_is_a_no_op() {
        let store = seeded(&[("Fries--wasted", json!(3))]).await;
        let outcome = move_to_wasted(&store, &bucket(), "Fries").await.unwrap();

        assert_eq!(outcome, MoveOutcome::Missing);
        let stored = store.get("wasteItems/19-10 2SH").await.unwrap().unwrap();
        assert_eq!(stored, json!({ "Fries--wasted": 3 }));
    }

    #[tokio::test]
    async fn move_selected_reports_and_clears_selection() {
        let store = seeded(&[("Fries", json!(4)), ("Wrap", json!("bad"))]).await;
        let mut selection = Selection::default();
        selection.toggle("Fries");
        selection.toggle("Tea");
        selection.toggle("Wrap");
        selection.toggle("Cola");
        selection.toggle("Cola");

        let report = move_selected(&store, &bucket(), &mut selection).await;

        assert_eq!(report.moved, vec!["Fries".to_string()]);
        assert_eq!(report.missing, vec!["Tea".to_string()]);
        assert_eq!(report.failed, vec!["Wrap".to_string()]);
        assert!(selection.selected().is_empty());
    }

    #[tokio::test]
    async fn load_buckets_returns_six_tabs_with_empty_ones() {
        let store = seeded(&[("Burger", json!(2)), ("Burger--wasted", json!(1))]).await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let views = load_buckets(&store, today).await;

        assert_eq!(views.len(), 6);
        assert_eq!(views[0].bucket.as_str(), "19-10 1SH");
        assert!(views[0].items.is_none());
        let evening = views[1].items.as_ref().unwrap();
        assert_eq!(evening.lines.len(), 2);
        assert_eq!(evening.lines[0].key, "Burger--wasted");
        assert!(views[2..].iter().all(|view| view.items.is_none()));
    }

    #[test]
    fn toggle_flips_selection() {
        let mut selection = Selection::default();
        assert!(selection.toggle("Fries"));
        assert!(selection.is_selected("Fries"));
        assert!(!selection.toggle("Fries"));
        assert!(!selection.is_selected("Fries"));
    }
}
