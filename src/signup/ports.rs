//! Driven ports
//!
//! The controller depends on these traits only. The `web` module implements
//! them over web-sys and gloo; tests implement them in-process.
//!
//! Everything runs on a single UI thread, so none of the traits require
//! `Send` and async methods use `#[async_trait(?Send)]`.

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::time::Duration;

use super::client::OutboundRequest;
use super::contact::ContactForm;
use super::error::{StoreError, SurfaceError, TransportError};

/// The one modal element the controller owns
pub trait DialogSurface {
  fn show_modal(&self) -> Result<(), SurfaceError>;

  /// Must be a no-op on an already closed surface
  fn close(&self);

  fn is_open(&self) -> bool;
}

/// String key/value storage (session or durable)
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Text element reflecting submission progress
pub trait StatusLabel {
  fn text(&self) -> String;

  fn set_text(&self, text: &str);
}

/// Sends JSON POST requests
#[async_trait(?Send)]
pub trait HttpTransport {
  /// Returns the HTTP status of the response; the body is ignored
  async fn post_json(&self, request: &OutboundRequest) -> Result<u16, TransportError>;
}

/// One-shot timers
pub trait Scheduler {
  fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Runs futures on the UI thread
pub trait Spawner {
  fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Event subscriptions on the page markup
pub trait PageEvents {
  fn on_close_click(&self, handler: Box<dyn Fn()>);

  /// The adapter cancels the default form submission before calling `handler`
  fn on_form_submit(&self, handler: Box<dyn Fn(ContactForm)>);
}
