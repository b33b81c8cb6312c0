//! Signup dialog - Client-Side Rendered (WASM)

use wasm_bindgen::JsValue;

fn main() {
  console_error_panic_hook::set_once();

  if let Err(e) = bytepad_signup::web::start() {
    web_sys::console::error_1(&JsValue::from_str(&format!(
      "Signup dialog failed to start: {}",
      e
    )));
  }
}
