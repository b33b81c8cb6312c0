//! Web Storage ports (sessionStorage / localStorage)
//!
//! Values are written raw. The flags are plain `"true"` strings that other page
//! scripts read back, so no JSON encoding is applied.

use std::rc::Rc;
use web_sys::{Storage, Window};

use super::describe_js;
use crate::signup::error::StoreError;
use crate::signup::memory::MemoryStore;
use crate::signup::ports::KeyValueStore;

pub struct WebStorage {
  storage: Storage,
}

impl WebStorage {
  pub fn new(storage: Storage) -> Self {
    Self { storage }
  }
}

impl KeyValueStore for WebStorage {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    self
      .storage
      .get_item(key)
      .map_err(|e| StoreError::Unavailable(describe_js(&e)))
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    self
      .storage
      .set_item(key, value)
      .map_err(|e| StoreError::WriteRejected {
        key: key.to_string(),
        reason: describe_js(&e),
      })
  }
}

/// `window.sessionStorage`, or a page-lifetime map when it cannot be opened
pub fn session(window: &Window) -> Rc<dyn KeyValueStore> {
  open("sessionStorage", window.session_storage())
}

/// `window.localStorage`, or a page-lifetime map when it cannot be opened
pub fn durable(window: &Window) -> Rc<dyn KeyValueStore> {
  open("localStorage", window.local_storage())
}

fn open(
  name: &'static str,
  storage: Result<Option<Storage>, wasm_bindgen::JsValue>,
) -> Rc<dyn KeyValueStore> {
  match storage {
    Ok(Some(storage)) => Rc::new(WebStorage::new(storage)),
    Ok(None) => {
      tracing::warn!(storage = name, "Storage not available; using in-memory flags");
      Rc::new(MemoryStore::new())
    }
    Err(e) => {
      tracing::warn!(storage = name, error = %describe_js(&e), "Storage blocked; using in-memory flags");
      Rc::new(MemoryStore::new())
    }
  }
}
