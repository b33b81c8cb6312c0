//! In-process key/value store

use std::cell::RefCell;
use std::collections::HashMap;

use super::error::StoreError;
use super::ports::KeyValueStore;

/// `KeyValueStore` backed by a map. Used when browser storage is unavailable
/// (storage disabled, sandboxed iframes), where flags then last for the page.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RefCell<HashMap<String, String>>,
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
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.borrow().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    self
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}
