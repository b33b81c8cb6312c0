//! In-process page for driving the signup controller in tests

#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use bytepad_signup::signup::error::{StoreError, SurfaceError, TransportError};
use bytepad_signup::signup::ports::{
  DialogSurface, HttpTransport, KeyValueStore, PageEvents, Scheduler, Spawner, StatusLabel,
};
use bytepad_signup::signup::{MemoryStore, OutboundRequest};
use bytepad_signup::{ContactForm, SignupConfig, SignupDialogController, SignupPorts};

pub const FLAG_KEY: &str = "dialogClosedByUser";

#[derive(Default)]
pub struct FakeDialog {
  open: Cell<bool>,
  pub shows: Cell<usize>,
  pub closes: Cell<usize>,
  pub reject_show: Cell<bool>,
}

impl DialogSurface for FakeDialog {
  fn show_modal(&self) -> Result<(), SurfaceError> {
    if self.reject_show.get() {
      return Err(SurfaceError::ShowRejected("InvalidStateError".into()));
    }
    self.open.set(true);
    self.shows.set(self.shows.get() + 1);
    Ok(())
  }

  fn close(&self) {
    self.open.set(false);
    self.closes.set(self.closes.get() + 1);
  }

  fn is_open(&self) -> bool {
    self.open.get()
  }
}

/// Button text the harness page renders before any submission
pub const BUTTON_TEXT: &str = "SIGN ME UP";

/// Current text plus every text written to it
pub struct FakeLabel {
  current: RefCell<String>,
  pub texts: RefCell<Vec<String>>,
}

impl FakeLabel {
  pub fn new(text: &str) -> Self {
    Self {
      current: RefCell::new(text.to_string()),
      texts: RefCell::new(Vec::new()),
    }
  }
}

impl StatusLabel for FakeLabel {
  fn text(&self) -> String {
    self.current.borrow().clone()
  }

  fn set_text(&self, text: &str) {
    *self.current.borrow_mut() = text.to_string();
    self.texts.borrow_mut().push(text.to_string());
  }
}

/// Answers requests from a queue; replies 200 once the queue is empty
#[derive(Default)]
pub struct ScriptedTransport {
  replies: RefCell<VecDeque<Result<u16, TransportError>>>,
  pub requests: RefCell<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
  pub fn reply(&self, reply: Result<u16, TransportError>) {
    self.replies.borrow_mut().push_back(reply);
  }

  pub fn request_count(&self) -> usize {
    self.requests.borrow().len()
  }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
  async fn post_json(&self, request: &OutboundRequest) -> Result<u16, TransportError> {
    self.requests.borrow_mut().push(request.clone());
    self.replies.borrow_mut().pop_front().unwrap_or(Ok(200))
  }
}

/// Store that refuses every write
pub struct FullStore;

impl KeyValueStore for FullStore {
  fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
    Ok(None)
  }

  fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
    Err(StoreError::WriteRejected {
      key: key.to_string(),
      reason: "QuotaExceededError".into(),
    })
  }
}

struct PendingTimer {
  due_at: u64,
  seq: u64,
  task: Box<dyn FnOnce()>,
}

/// Timers fire only when the test advances time
#[derive(Default)]
pub struct ManualClock {
  now_ms: Cell<u64>,
  next_seq: Cell<u64>,
  timers: RefCell<Vec<PendingTimer>>,
}

impl ManualClock {
  pub fn now_ms(&self) -> u64 {
    self.now_ms.get()
  }

  pub fn pending(&self) -> usize {
    self.timers.borrow().len()
  }

  /// Move time forward and run every timer that came due, in due order
  pub fn advance(&self, delta_ms: u64) -> usize {
    self.now_ms.set(self.now_ms.get() + delta_ms);
    let mut ran = 0;
    while let Some(task) = self.take_next_due() {
      task();
      ran += 1;
    }
    ran
  }

  fn take_next_due(&self) -> Option<Box<dyn FnOnce()>> {
    let mut timers = self.timers.borrow_mut();
    let now = self.now_ms.get();
    let idx = timers
      .iter()
      .enumerate()
      .filter(|(_, t)| t.due_at <= now)
      .min_by_key(|(_, t)| (t.due_at, t.seq))
      .map(|(i, _)| i)?;
    Some(timers.remove(idx).task)
  }
}

impl Scheduler for ManualClock {
  fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
    let seq = self.next_seq.get();
    self.next_seq.set(seq + 1);
    self.timers.borrow_mut().push(PendingTimer {
      due_at: self.now_ms.get() + delay.as_millis() as u64,
      seq,
      task,
    });
  }
}

/// Holds spawned tasks until the test runs them
#[derive(Default)]
pub struct LocalSpawner {
  tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl LocalSpawner {
  pub fn pending(&self) -> usize {
    self.tasks.borrow().len()
  }

  pub fn run_pending(&self) {
    loop {
      let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
      if tasks.is_empty() {
        return;
      }
      for task in tasks {
        tokio_test::block_on(task);
      }
    }
  }
}

impl Spawner for LocalSpawner {
  fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
    self.tasks.borrow_mut().push(task);
  }
}

#[derive(Default)]
pub struct RecordedEvents {
  close_handlers: RefCell<Vec<Box<dyn Fn()>>>,
  submit_handlers: RefCell<Vec<Box<dyn Fn(ContactForm)>>>,
}

impl PageEvents for RecordedEvents {
  fn on_close_click(&self, handler: Box<dyn Fn()>) {
    self.close_handlers.borrow_mut().push(handler);
  }

  fn on_form_submit(&self, handler: Box<dyn Fn(ContactForm)>) {
    self.submit_handlers.borrow_mut().push(handler);
  }
}

pub struct Page {
  pub dialog: Rc<FakeDialog>,
  pub session: Rc<MemoryStore>,
  pub durable: Rc<MemoryStore>,
  pub transport: Rc<ScriptedTransport>,
  pub label: Rc<FakeLabel>,
  pub clock: Rc<ManualClock>,
  pub spawner: Rc<LocalSpawner>,
  pub events: RecordedEvents,
  pub controller: Rc<SignupDialogController>,
}

impl Page {
  pub fn new(config: SignupConfig) -> Self {
    let dialog = Rc::new(FakeDialog::default());
    let session = Rc::new(MemoryStore::new());
    let durable = Rc::new(MemoryStore::new());
    let transport = Rc::new(ScriptedTransport::default());
    let label = Rc::new(FakeLabel::new(BUTTON_TEXT));
    let clock = Rc::new(ManualClock::default());
    let spawner = Rc::new(LocalSpawner::default());

    let ports = SignupPorts {
      dialog: dialog.clone(),
      session_store: session.clone(),
      durable_store: durable.clone(),
      transport: transport.clone(),
      status_label: Some(label.clone()),
      scheduler: clock.clone(),
      spawner: spawner.clone(),
    };

    Self {
      dialog,
      session,
      durable,
      transport,
      label,
      clock,
      spawner,
      events: RecordedEvents::default(),
      controller: SignupDialogController::new(config, ports),
    }
  }

  /// Page with default config, initialized and with the dialog shown
  pub fn shown() -> Self {
    let page = Self::new(SignupConfig::default());
    page.initialize();
    page.clock.advance(2000);
    assert!(page.dialog.is_open());
    page
  }

  pub fn initialize(&self) {
    self.controller.initialize(&self.events);
  }

  pub fn click_close(&self) {
    for handler in self.events.close_handlers.borrow().iter() {
      handler();
    }
  }

  /// Dispatch the submit event without letting the request finish
  pub fn fire_submit(&self, form: ContactForm) {
    for handler in self.events.submit_handlers.borrow().iter() {
      handler(form.clone());
    }
  }

  pub fn submit(&self, form: ContactForm) {
    self.fire_submit(form);
    self.spawner.run_pending();
  }

  pub fn session_flag(&self) -> Option<String> {
    self.session.get(FLAG_KEY).ok().flatten()
  }

  pub fn durable_flag(&self) -> Option<String> {
    self.durable.get(FLAG_KEY).ok().flatten()
  }

  pub fn labels(&self) -> Vec<String> {
    self.label.texts.borrow().clone()
  }
}

pub fn form(first_name: &str, last_name: &str, email: &str) -> ContactForm {
  ContactForm::new()
    .with("FIRSTNAME", first_name)
    .with("LASTNAME", last_name)
    .with("EMAIL", email)
}
