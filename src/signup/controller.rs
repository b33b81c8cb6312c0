//! Signup dialog controller

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::client::{ContactClient, SubmissionOutcome};
use super::config::SignupConfig;
use super::contact::ContactForm;
use super::dismissal::DismissalFlags;
use super::ports::{
  DialogSurface, HttpTransport, KeyValueStore, PageEvents, Scheduler, Spawner, StatusLabel,
};

/// Lifecycle of the dialog surface. There is no path back to `Shown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogPhase {
  #[default]
  Unopened,
  Shown,
  Closed,
}

/// Everything the controller talks to
#[derive(Clone)]
pub struct SignupPorts {
  pub dialog: Rc<dyn DialogSurface>,
  pub session_store: Rc<dyn KeyValueStore>,
  pub durable_store: Rc<dyn KeyValueStore>,
  pub transport: Rc<dyn HttpTransport>,
  pub status_label: Option<Rc<dyn StatusLabel>>,
  pub scheduler: Rc<dyn Scheduler>,
  pub spawner: Rc<dyn Spawner>,
}

/// Owns the signup dialog for one page.
///
/// Create one per page and call [`initialize`](Self::initialize) once. A second
/// call registers every handler again.
pub struct SignupDialogController {
  config: SignupConfig,
  dialog: Rc<dyn DialogSurface>,
  status_label: Option<Rc<dyn StatusLabel>>,
  scheduler: Rc<dyn Scheduler>,
  spawner: Rc<dyn Spawner>,
  client: ContactClient,
  flags: DismissalFlags,
  phase: Cell<DialogPhase>,
  initialized: Cell<bool>,
  /// Label text from before the first submission
  resting_label: RefCell<Option<String>>,
}

impl SignupDialogController {
  pub fn new(config: SignupConfig, ports: SignupPorts) -> Rc<Self> {
    let client = ContactClient::from_config(&config, ports.transport);
    let flags = DismissalFlags::new(
      config.storage_key.clone(),
      ports.session_store,
      ports.durable_store,
    );
    Rc::new(Self {
      config,
      dialog: ports.dialog,
      status_label: ports.status_label,
      scheduler: ports.scheduler,
      spawner: ports.spawner,
      client,
      flags,
      phase: Cell::new(DialogPhase::Unopened),
      initialized: Cell::new(false),
      resting_label: RefCell::new(None),
    })
  }

  pub fn config(&self) -> &SignupConfig {
    &self.config
  }

  pub fn phase(&self) -> DialogPhase {
    self.phase.get()
  }

  pub fn flags(&self) -> &DismissalFlags {
    &self.flags
  }

  /// Wire the close and submit handlers and schedule the auto-display timer
  pub fn initialize(self: &Rc<Self>, events: &dyn PageEvents) {
    if self.initialized.replace(true) {
      tracing::warn!("Signup dialog initialized twice; handlers are now registered twice");
    }

    let this = Rc::clone(self);
    events.on_close_click(Box::new(move || this.handle_close_click()));

    let this = Rc::clone(self);
    events.on_form_submit(Box::new(move |form| this.handle_submit(form)));

    let this = Rc::clone(self);
    self.scheduler.schedule_once(
      self.config.auto_open_delay(),
      Box::new(move || this.auto_open()),
    );

    tracing::info!(
      delay_ms = self.config.auto_open_delay_ms,
      "Signup dialog initialized"
    );
  }

  /// Timer callback: present the dialog modally
  pub fn auto_open(&self) {
    if self.phase.get() == DialogPhase::Closed {
      tracing::debug!("Signup dialog already closed; not reopening");
      return;
    }

    if self.flags.is_dismissed() {
      if self.config.respect_dismissal {
        tracing::info!("Signup dialog previously dismissed; skipping auto-display");
        return;
      }
      tracing::info!("Signup dialog previously dismissed; showing anyway");
    }

    match self.dialog.show_modal() {
      Ok(()) => {
        self.phase.set(DialogPhase::Shown);
        tracing::info!("Signup dialog shown");
      }
      Err(e) => tracing::warn!(error = %e, "Failed to show signup dialog"),
    }
  }

  pub fn handle_close_click(&self) {
    if let Err(e) = self.flags.mark_closed_by_user() {
      tracing::warn!(error = %e, "Failed to persist session dismissal flag");
    }
    self.close();
    tracing::info!("Signup dialog closed by user");
  }

  /// Submit handler: run the submission on the spawner
  pub fn handle_submit(self: &Rc<Self>, form: ContactForm) {
    let this = Rc::clone(self);
    self.spawner.spawn_local(Box::pin(async move {
      this.submit(&form).await;
    }));
  }

  /// Send the form and apply the outcome to the dialog
  pub async fn submit(self: &Rc<Self>, form: &ContactForm) -> SubmissionOutcome {
    let contact = match form.to_contact(&self.config.fields) {
      Ok(c) => c,
      Err(e) => {
        let outcome = SubmissionOutcome::InvalidForm(e);
        self.apply(&outcome);
        return outcome;
      }
    };

    self.remember_label();
    self.set_status(&self.config.status.in_progress);
    let outcome = self.client.register(&contact).await;
    self.apply(&outcome);
    outcome
  }

  fn apply(self: &Rc<Self>, outcome: &SubmissionOutcome) {
    if !outcome.is_success() {
      // Dialog stays open so the visitor can try again
      tracing::warn!(outcome = %outcome, "Signup submission failed");
      if !matches!(outcome, SubmissionOutcome::InvalidForm(_)) {
        self.restore_label();
      }
      return;
    }

    tracing::info!(outcome = %outcome, "Signup submission accepted");
    if let Err(e) = self.flags.mark_subscribed() {
      tracing::warn!(error = %e, "Failed to persist durable dismissal flag");
    }
    self.set_status(&self.config.status.done);

    match self.config.close_delay() {
      None => self.close(),
      Some(delay) => {
        let this = Rc::clone(self);
        self.scheduler.schedule_once(delay, Box::new(move || this.close()));
      }
    }
  }

  fn close(&self) {
    self.dialog.close();
    self.phase.set(DialogPhase::Closed);
  }

  /// Overlapping submissions must not capture the in-progress text
  fn remember_label(&self) {
    let Some(label) = &self.status_label else {
      return;
    };
    let mut resting = self.resting_label.borrow_mut();
    if resting.is_none() {
      *resting = Some(label.text());
    }
  }

  fn restore_label(&self) {
    let resting = self.resting_label.borrow().clone();
    if let Some(text) = resting {
      self.set_status(&text);
    }
  }

  fn set_status(&self, text: &str) {
    if let Some(label) = &self.status_label {
      label.set_text(text);
    }
  }
}
