//! Timers and task spawning on the browser event loop

use futures_util::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use std::time::Duration;

use crate::signup::ports::{Scheduler, Spawner};

/// gloo-timers passes the delay on as an i32
const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// `setTimeout`-backed one-shot timers. Timers are never cancelled.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
  fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
    let millis = u32::try_from(delay.as_millis())
      .unwrap_or(u32::MAX)
      .min(MAX_TIMEOUT_MS);
    Timeout::new(millis, task).forget();
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
  fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
    wasm_bindgen_futures::spawn_local(task);
  }
}
