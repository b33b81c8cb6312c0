//! Browser adapters (CSR/WASM)
//!
//! Implements the signup ports over web-sys and gloo and boots the controller
//! against the page markup.

mod boot;
pub mod dom;
pub mod http;
pub mod logging;
pub mod runtime;
pub mod storage;

pub use boot::{load_page_config, mount, start, BootError, CONFIG_ELEMENT_ID};

use wasm_bindgen::{JsCast, JsValue};

/// Readable text for a thrown JS value
pub(crate) fn describe_js(value: &JsValue) -> String {
  if let Some(s) = value.as_string() {
    return s;
  }
  if let Some(e) = value.dyn_ref::<js_sys::Error>() {
    return String::from(e.message());
  }
  format!("{:?}", value)
}
