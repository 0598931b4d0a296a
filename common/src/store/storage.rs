//! Persistence seam for the scan history.
//!
//! The history is stored as a single JSON array under [`HISTORY_KEY`] in a
//! string key-value store. In the browser that store is `window.localStorage`
//! (see `frontend/src/store/local_storage.rs`); tests use [`MemoryStorage`].

use crate::model::product::ScanResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Key under which the serialized history array lives.
pub const HISTORY_KEY: &str = "scanHistory";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored history is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal string key-value store, modelled on the Web Storage API.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads the persisted history. A missing entry is an empty history.
pub fn load_history<S: KeyValueStorage + ?Sized>(
    storage: &S,
) -> Result<Vec<ScanResult>, StorageError> {
    match storage.get_item(HISTORY_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Overwrites the persisted history with `history`.
pub fn save_history<S: KeyValueStorage + ?Sized>(
    storage: &S,
    history: &[ScanResult],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(history)?;
    storage.set_item(HISTORY_KEY, &raw)
}

/// In-memory storage. Clones share the same underlying map, which lets a
/// test "restart" a store against the data a previous instance wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
