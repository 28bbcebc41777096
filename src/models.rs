use crate::bucket::BucketKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Waste quantity. Whole units for most products; fractional weights are
/// allowed for reserved-waste ingredients.
pub type Quantity = f64;

pub const WASTED_SUFFIX: &str = "--wasted";
pub const RESERVED_PREFIX: &str = "RW-";

pub fn wasted_key(item: &str) -> String {
    format!("{item}{WASTED_SUFFIX}")
}

/// Sums are kept to three decimals so fractional weights do not drift.
pub fn round_quantity(quantity: Quantity) -> Quantity {
    (quantity * 1000.0).round() / 1000.0
}

/// Whole quantities are stored as JSON integers so the ledger reads `5`, not `5.0`.
pub fn quantity_value(quantity: Quantity) -> Value {
    if quantity.fract() == 0.0 && quantity.abs() < i64::MAX as f64 {
        Value::from(quantity as i64)
    } else {
        Value::from(quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEntry {
    pub product: String,
    pub amount: Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "quantity", rename_all = "snake_case")]
pub enum ItemState {
    Pending(Quantity),
    Wasted(Quantity),
}

impl ItemState {
    pub fn quantity(self) -> Quantity {
        match self {
            ItemState::Pending(q) | ItemState::Wasted(q) => q,
        }
    }
}

/// One stored key of a bucket, decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketLine {
    pub key: String,
    pub item: String,
    #[serde(flatten)]
    pub state: ItemState,
    pub reserved: bool,
}

impl BucketLine {
    pub fn decode(key: &str, quantity: Quantity) -> Self {
        let (item, state) = match key.strip_suffix(WASTED_SUFFIX) {
            Some(item) => (item, ItemState::Wasted(quantity)),
            None => (key, ItemState::Pending(quantity)),
        };
        Self {
            key: key.to_string(),
            item: item.to_string(),
            state,
            reserved: item.starts_with(RESERVED_PREFIX),
        }
    }
}

/// Decoded contents of one bucket: wasted lines first, then pending lines,
/// each group ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BucketRecord {
    pub lines: Vec<BucketLine>,
}

impl BucketRecord {
    pub fn decode(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            warn!("bucket payload is not an object, ignoring it");
            return Self::default();
        };
        let mut lines: Vec<BucketLine> = map
            .iter()
            .filter_map(|(key, raw)| match raw.as_f64() {
                Some(quantity) => Some(BucketLine::decode(key, quantity)),
                None => {
                    warn!(%key, "non-numeric quantity in bucket, skipping");
                    None
                }
            })
            .collect();
        lines.sort_by(|a, b| {
            let a_pending = matches!(a.state, ItemState::Pending(_));
            let b_pending = matches!(b.state, ItemState::Pending(_));
            a_pending.cmp(&b_pending).then_with(|| a.key.cmp(&b.key))
        });
        Self { lines }
    }

    pub fn pending(&self, item: &str) -> Option<Quantity> {
        self.find(item, |state| matches!(state, ItemState::Pending(_)))
    }

    pub fn wasted(&self, item: &str) -> Option<Quantity> {
        self.find(item, |state| matches!(state, ItemState::Wasted(_)))
    }

    fn find(&self, item: &str, wanted: impl Fn(ItemState) -> bool) -> Option<Quantity> {
        self.lines
            .iter()
            .find(|line| line.item == item && wanted(line.state))
            .map(|line| line.state.quantity())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketView {
    pub bucket: BucketKey,
    pub items: Option<BucketRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub date: String,
    pub waste_items: BTreeMap<String, Quantity>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(flatten)]
    pub record: HistoryRecord,
}

#[derive(Debug, Deserialize)]
pub struct DigitRequest {
    pub digit: char,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub product: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub item: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub bucket: BucketKey,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub pending_amount: String,
    pub category: usize,
    pub entries: Vec<WasteEntry>,
}

#[derive(Debug, Serialize)]
pub struct BucketResponse {
    pub bucket: BucketKey,
}

#[derive(Debug, Serialize)]
pub struct ClosingResponse {
    pub buckets: Vec<BucketView>,
    pub selected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_splits_pending_and_wasted_keys() {
        let record = BucketRecord::decode(&json!({
            "Fries": 4,
            "Fries--wasted": 10,
            "RW-Ketchup": 1.5,
        }));

        assert_eq!(record.pending("Fries"), Some(4.0));
        assert_eq!(record.wasted("Fries"), Some(10.0));
        assert_eq!(record.pending("RW-Ketchup"), Some(1.5));
        assert_eq!(record.wasted("RW-Ketchup"), None);
        assert_eq!(record.lines[0].key, "Fries--wasted");
        assert!(record.lines.iter().any(|line| line.reserved));
    }

    #[test]
    fn decode_skips_non_numeric_values() {
        let record = BucketRecord::decode(&json!({ "Cola": "two", "Burger": 1 }));
        assert_eq!(record.lines.len(), 1);
        assert_eq!(record.pending("Burger"), Some(1.0));
    }

    #[test]
    fn rounding_removes_float_noise() {
        assert_eq!(round_quantity(0.1 + 0.2), 0.3);
        assert_eq!(round_quantity(1.23456), 1.235);
        assert_eq!(quantity_value(round_quantity(0.1 + 0.2)), json!(0.3));
    }

    #[test]
    fn whole_quantities_serialize_as_integers() {
        assert_eq!(quantity_value(5.0), json!(5));
        assert_eq!(quantity_value(0.5), json!(0.5));
    }

    #[test]
    fn line_serializes_with_tagged_state() {
        let line = BucketLine::decode("Fries--wasted", 4.0);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["item"], json!("Fries"));
        assert_eq!(value["state"], json!("wasted"));
        assert_eq!(value["quantity"], json!(4.0));
    }
}
