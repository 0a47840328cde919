//! In-process [`DocumentStore`] backed by a JSON tree.
//!
//! Used for local development (`STORE_URL=memory`) and tests. Data lives for
//! the lifetime of the process. Semantics follow the remote store: absent
//! nodes read as `None`, merges create missing parents, `null` patch values
//! remove keys, and deleting an absent node succeeds.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{segments, DocumentStore, StoreError};

/// Thread-safe in-memory document tree.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    root: RwLock<Value>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_children(&self, path: &str) -> Result<Map<String, Value>, StoreError> {
        let root = self.root.read().await;
        match lookup(&root, path) {
            None => Ok(Map::new()),
            Some(Value::Object(children)) => Ok(children.clone()),
            Some(other) => Err(StoreError::UnexpectedShape {
                path: path.to_string(),
                detail: format!("expected an object, found {other}"),
            }),
        }
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let root = self.root.read().await;
        Ok(lookup(&root, path).cloned())
    }

    async fn write_new(&self, collection: &str, value: Value) -> Result<String, StoreError> {
        // v7 keys sort by creation time, like the remote store's push keys.
        let key = Uuid::now_v7().simple().to_string();
        let mut root = self.root.write().await;
        descend_or_create(&mut root, collection).insert(key.clone(), value);
        Ok(key)
    }

    async fn merge(&self, path: &str, patch: Value) -> Result<(), StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::UnexpectedShape {
                path: path.to_string(),
                detail: "merge patch must be an object".into(),
            });
        };

        let mut root = self.root.write().await;
        let target = descend_or_create(&mut root, path);
        for (key, value) in patch {
            if value.is_null() {
                target.remove(&key);
            } else {
                target.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        let parts: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = parts.split_last() else {
            *root = Value::Object(Map::new());
            return Ok(());
        };

        let parent = parents
            .iter()
            .try_fold(&mut *root, |node, part| node.get_mut(*part));
        if let Some(map) = parent.and_then(Value::as_object_mut) {
            map.remove(*last);
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(root, |node, part| node.as_object()?.get(part))
}

/// Walk to `path`, turning every missing or non-object node on the way into
/// an empty object, and return the object at the end.
fn descend_or_create<'a>(root: &'a mut Value, path: &str) -> &'a mut Map<String, Value> {
    let mut node = root;
    for part in segments(path) {
        node = ensure_object(node)
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(node)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    value
        .as_object_mut()
        .expect("value was just replaced with an object")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn absent_paths_read_as_none_and_list_empty() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.read("characters/nope").await.unwrap(), None);
        assert!(store.list_children("characters").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn write_new_generates_distinct_ordered_keys() {
        let store = MemoryDocumentStore::new();
        let first = store.write_new("characters", json!({"name": "a"})).await.unwrap();
        let second = store.write_new("characters", json!({"name": "b"})).await.unwrap();

        assert_ne!(first, second);
        let keys: Vec<String> = store
            .list_children("characters")
            .await
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec![first.clone(), second]);
        assert_eq!(
            store.read(&format!("characters/{first}")).await.unwrap(),
            Some(json!({"name": "a"}))
        );
    }

    #[tokio::test]
    async fn merge_replaces_only_given_keys() {
        let store = MemoryDocumentStore::new();
        let key = store
            .write_new("characters", json!({"name": "a", "universe": "u"}))
            .await
            .unwrap();
        let path = format!("characters/{key}");

        store.merge(&path, json!({"name": "b"})).await.unwrap();

        assert_eq!(
            store.read(&path).await.unwrap(),
            Some(json!({"name": "b", "universe": "u"}))
        );
    }

    #[tokio::test]
    async fn merge_with_null_removes_key() {
        let store = MemoryDocumentStore::new();
        store.merge("a/b", json!({"x": 1, "y": 2})).await.unwrap();
        store.merge("a/b", json!({"x": null})).await.unwrap();
        assert_eq!(store.read("a/b").await.unwrap(), Some(json!({"y": 2})));
    }

    #[tokio::test]
    async fn merge_rejects_non_object_patch() {
        let store = MemoryDocumentStore::new();
        assert!(store.merge("a", json!(3)).await.is_err());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryDocumentStore::new();
        let key = store.write_new("characters", json!({})).await.unwrap();
        let path = format!("characters/{key}");

        store.delete(&path).await.unwrap();
        store.delete(&path).await.unwrap();
        store.delete("missing/deeper/path").await.unwrap();

        assert_eq!(store.read(&path).await.unwrap(), None);
    }

    #[tokio::test]
    async fn listing_a_leaf_is_an_error() {
        let store = MemoryDocumentStore::new();
        store.merge("config", json!({"flag": true})).await.unwrap();
        assert!(store.list_children("config/flag").await.is_err());
    }
}
