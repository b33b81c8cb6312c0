//! Page boot: config, logging, ports, controller

use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDialogElement, HtmlFormElement};

use super::dom::{WebDialog, WebPageEvents, WebStatusLabel};
use super::http::FetchTransport;
use super::runtime::{BrowserScheduler, BrowserSpawner};
use super::{logging, storage};
use crate::signup::config::SignupConfig;
use crate::signup::error::ConfigError;
use crate::signup::ports::StatusLabel;
use crate::signup::{SignupDialogController, SignupPorts};

/// Id of the optional `<script>` element holding the page's signup config
pub const CONFIG_ELEMENT_ID: &str = "signup-config";

#[derive(Debug, Error)]
pub enum BootError {
  #[error("No global window")]
  NoWindow,

  #[error("Window has no document")]
  NoDocument,

  #[error("Element #{0} not found")]
  MissingElement(String),

  #[error("Element #{id} is not a {expected}")]
  WrongElementType { id: String, expected: &'static str },

  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Boot the signup dialog on the current page
pub fn start() -> Result<Rc<SignupDialogController>, BootError> {
  let window = web_sys::window().ok_or(BootError::NoWindow)?;
  let document = window.document().ok_or(BootError::NoDocument)?;

  let config = load_page_config(&document)?;
  logging::init(&config.logging);

  mount(config)
}

/// Read the config embedded in the page. JSON and YAML bodies are both accepted.
pub fn load_page_config(document: &Document) -> Result<SignupConfig, BootError> {
  let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
    return Ok(SignupConfig::default());
  };

  let content = element.text_content().unwrap_or_default();
  if content.trim().is_empty() {
    return Ok(SignupConfig::default());
  }
  Ok(SignupConfig::from_yaml_str(&content)?)
}

/// Resolve the markup, build the ports and initialize the controller
pub fn mount(config: SignupConfig) -> Result<Rc<SignupDialogController>, BootError> {
  let window = web_sys::window().ok_or(BootError::NoWindow)?;
  let document = window.document().ok_or(BootError::NoDocument)?;

  let dialog: HtmlDialogElement = element_by_id(&document, &config.elements.dialog)?;
  let close_button: Element = element_by_id(&document, &config.elements.close_button)?;
  let form: HtmlFormElement = element_by_id(&document, &config.elements.form)?;

  let status_label = config.elements.status_label.as_deref().and_then(|id| {
    let element = document.get_element_by_id(id);
    if element.is_none() {
      tracing::debug!(id, "Status label not found; progress text disabled");
    }
    element.map(|e| Rc::new(WebStatusLabel::new(e)) as Rc<dyn StatusLabel>)
  });

  let ports = SignupPorts {
    dialog: Rc::new(WebDialog::new(dialog)),
    session_store: storage::session(&window),
    durable_store: storage::durable(&window),
    transport: Rc::new(FetchTransport),
    status_label,
    scheduler: Rc::new(BrowserScheduler),
    spawner: Rc::new(BrowserSpawner),
  };

  let controller = SignupDialogController::new(config, ports);
  controller.initialize(&WebPageEvents::new(close_button, form));
  Ok(controller)
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, BootError> {
  document
    .get_element_by_id(id)
    .ok_or_else(|| BootError::MissingElement(id.to_string()))?
    .dyn_into::<T>()
    .map_err(|_| BootError::WrongElementType {
      id: id.to_string(),
      expected: std::any::type_name::<T>(),
    })
}
