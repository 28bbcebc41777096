//! Path-addressed ledger store.
//!
//! Paths are `/`-joined segments such as `wasteItems/19-10 1SH/Burger`.
//! Segments follow realtime-database key rules: non-empty, and none of
//! `. $ # [ ] /`.

use crate::errors::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub const WASTE_ROOT: &str = "wasteItems";
pub const HISTORY_ROOT: &str = "actionHistory";

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Value stored at `path`, `None` when nothing is there.
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the value at `path`. Writing `null` removes it.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Merges the children of `partial` into the object at `path`.
    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError>;

    async fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Appends `value` under a new store-generated child key and returns that key.
    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError>;
}

pub fn validate_segment(segment: &str) -> Result<(), StoreError> {
    const FORBIDDEN: [char; 6] = ['.', '$', '#', '[', ']', '/'];
    if segment.trim().is_empty() || segment.contains(FORBIDDEN) {
        return Err(StoreError::InvalidPath(segment.to_string()));
    }
    Ok(())
}

pub fn ledger_path(segments: &[&str]) -> Result<String, StoreError> {
    for segment in segments {
        validate_segment(segment)?;
    }
    Ok(segments.join("/"))
}

pub fn split_path(path: &str) -> Result<Vec<&str>, StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments {
        validate_segment(segment)?;
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_path_joins_segments() {
        let path = ledger_path(&[WASTE_ROOT, "19-10 1SH", "RW-Ketchup"]).unwrap();
        assert_eq!(path, "wasteItems/19-10 1SH/RW-Ketchup");
    }

    #[test]
    fn ledger_path_rejects_reserved_characters() {
        assert!(ledger_path(&[WASTE_ROOT, "a/b"]).is_err());
        assert!(ledger_path(&[WASTE_ROOT, "1.5kg"]).is_err());
        assert!(ledger_path(&[WASTE_ROOT, ""]).is_err());
        assert!(split_path("wasteItems//x").is_err());
    }
}
