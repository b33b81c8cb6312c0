//! Dismissal flags
//!
//! The same key is written to two independent stores: the session store when
//! the visitor closes the dialog, the durable store when they subscribe.
//! Nothing ties the two together; either one set means "do not auto-show".

use std::rc::Rc;

use super::error::StoreError;
use super::ports::KeyValueStore;

pub const FLAG_VALUE: &str = "true";

#[derive(Clone)]
pub struct DismissalFlags {
  key: String,
  session: Rc<dyn KeyValueStore>,
  durable: Rc<dyn KeyValueStore>,
}

impl DismissalFlags {
  pub fn new(
    key: impl Into<String>,
    session: Rc<dyn KeyValueStore>,
    durable: Rc<dyn KeyValueStore>,
  ) -> Self {
    Self {
      key: key.into(),
      session,
      durable,
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Visitor closed the dialog; lasts for the browsing session
  pub fn mark_closed_by_user(&self) -> Result<(), StoreError> {
    self.session.set(&self.key, FLAG_VALUE)
  }

  /// Visitor subscribed; lasts until storage is cleared
  pub fn mark_subscribed(&self) -> Result<(), StoreError> {
    self.durable.set(&self.key, FLAG_VALUE)
  }

  pub fn closed_this_session(&self) -> bool {
    is_set(self.session.as_ref(), &self.key)
  }

  pub fn subscribed(&self) -> bool {
    is_set(self.durable.as_ref(), &self.key)
  }

  /// Page-load check: true if either flag is set. Unreadable stores count as unset.
  pub fn is_dismissed(&self) -> bool {
    self.closed_this_session() || self.subscribed()
  }
}

fn is_set(store: &dyn KeyValueStore, key: &str) -> bool {
  match store.get(key) {
    Ok(value) => value.as_deref() == Some(FLAG_VALUE),
    Err(e) => {
      tracing::warn!(key, error = %e, "Failed to read dismissal flag");
      false
    }
  }
}
