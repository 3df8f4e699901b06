//! String key/value stores backing the browser-persisted state.
//!
//! Pages never touch `web_sys::Storage` directly. They go through a
//! [`KeyValueStore`] so that the same load/save code runs against the real
//! browser stores and against [`MemoryStore`] in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("browser storage is not available")]
    Unavailable,
    #[error("browser storage failed: {0}")]
    Browser(String),
    #[error("stored value under '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()?
        .ok_or(StorageError::Unavailable)
}

fn session_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .session_storage()?
        .ok_or(StorageError::Unavailable)
}

/// `window.localStorage`, kept across browser sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserLocalStore;

impl KeyValueStore for BrowserLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(local_storage()?.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(local_storage()?.set_item(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Ok(local_storage()?.remove_item(key)?)
    }
}

/// `window.sessionStorage`, cleared when the tab closes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserSessionStore;

impl KeyValueStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(session_storage()?.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(session_storage()?.set_item(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Ok(session_storage()?.remove_item(key)?)
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and parses a JSON value. A missing key is `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("a", "1").unwrap();
        assert_eq!(other.get("a").unwrap().as_deref(), Some("1"));
        other.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<Vec<i32>>(&store, "numbers").unwrap(), None);

        save_json(&store, "numbers", &vec![1, 2, 3]).unwrap();
        assert_eq!(load_json::<Vec<i32>>(&store, "numbers").unwrap(), Some(vec![1, 2, 3]));

        store.set("numbers", "{not json").unwrap();
        assert!(matches!(
            load_json::<Vec<i32>>(&store, "numbers"),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
