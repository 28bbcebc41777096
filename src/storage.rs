use crate::errors::StoreError;
use crate::store::{LedgerStore, split_path};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};
use uuid::Uuid;

/// Ledger kept as one JSON tree in memory and written to disk after every
/// mutation. Without a path it never touches the filesystem.
pub struct FileStore {
    path: Option<PathBuf>,
    root: Mutex<Value>,
}

impl FileStore {
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let root = load_tree(&path).await;
        Ok(Self {
            path: Some(path),
            root: Mutex::new(root),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            root: Mutex::new(Value::Object(Map::new())),
        }
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Value {
        self.root.lock().await.clone()
    }

    /// Applies `change` to a copy of the tree and swaps the copy in only once
    /// it is on disk, so a failed write leaves memory as it was.
    async fn commit(&self, change: impl FnOnce(&mut Value)) -> Result<(), StoreError> {
        let mut root = self.root.lock().await;
        let mut next = root.clone();
        change(&mut next);
        self.persist(&next).await?;
        *root = next;
        Ok(())
    }

    async fn persist(&self, root: &Value) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(root)?;
        fs::write(path, payload).await?;
        debug!(path = %path.display(), "ledger persisted");
        Ok(())
    }
}

pub async fn load_tree(path: &Path) -> Value {
    let empty = || Value::Object(Map::new());
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                error!("ledger file is not a JSON object, starting empty");
                empty()
            }
            Err(err) => {
                error!("failed to parse ledger file: {err}");
                empty()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => empty(),
        Err(err) => {
            error!("failed to read ledger file: {err}");
            empty()
        }
    }
}

fn lookup<'a>(node: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments.iter().try_fold(node, |current, segment| current.get(*segment))
}

fn insert_at(node: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(head.to_string()).or_insert(Value::Null);
        insert_at(child, rest, value);
    }
}

/// Removes the value and prunes parents left empty, so an emptied bucket
/// reads back as absent.
fn remove_at(node: &mut Value, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let Value::Object(map) = node else {
        return;
    };
    if rest.is_empty() {
        map.remove(*head);
        return;
    }
    if let Some(child) = map.get_mut(*head) {
        remove_at(child, rest);
        if child.as_object().is_some_and(Map::is_empty) {
            map.remove(*head);
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    value.is_null() || value.as_object().is_some_and(Map::is_empty)
}

#[async_trait]
impl LedgerStore for FileStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let segments = split_path(path)?;
        let root = self.root.lock().await;
        Ok(lookup(&root, &segments).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let segments = split_path(path)?;
        self.commit(|root| {
            if is_empty_value(&value) {
                remove_at(root, &segments);
            } else {
                insert_at(root, &segments, value);
            }
        })
        .await
    }

    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError> {
        let segments = split_path(path)?;
        let mut changes = Vec::with_capacity(partial.len());
        for (key, value) in &partial {
            let mut child = segments.clone();
            child.extend(split_path(key)?);
            changes.push((child, value.clone()));
        }
        self.commit(|root| {
            for (child, value) in changes {
                if is_empty_value(&value) {
                    remove_at(root, &child);
                } else {
                    insert_at(root, &child, value);
                }
            }
        })
        .await
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let segments = split_path(path)?;
        self.commit(|root| remove_at(root, &segments)).await
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut segments = split_path(path)?;
        segments.push(&id);
        self.commit(|root| insert_at(root, &segments, value)).await?;
        Ok(id)
    }
}
