//! DOM-backed ports: dialog, status label, page events

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Event, FormData, HtmlDialogElement, HtmlFormElement, HtmlInputElement};

use super::describe_js;
use crate::signup::contact::ContactForm;
use crate::signup::error::SurfaceError;
use crate::signup::ports::{DialogSurface, PageEvents, StatusLabel};

/// `<dialog>` element
pub struct WebDialog {
  element: HtmlDialogElement,
}

impl WebDialog {
  pub fn new(element: HtmlDialogElement) -> Self {
    Self { element }
  }
}

impl DialogSurface for WebDialog {
  fn show_modal(&self) -> Result<(), SurfaceError> {
    self
      .element
      .show_modal()
      .map_err(|e| SurfaceError::ShowRejected(describe_js(&e)))
  }

  fn close(&self) {
    self.element.close();
  }

  fn is_open(&self) -> bool {
    self.element.open()
  }
}

pub struct WebStatusLabel {
  element: Element,
}

impl WebStatusLabel {
  pub fn new(element: Element) -> Self {
    Self { element }
  }
}

impl StatusLabel for WebStatusLabel {
  fn text(&self) -> String {
    self.element.text_content().unwrap_or_default()
  }

  fn set_text(&self, text: &str) {
    self.element.set_text_content(Some(text));
  }
}

/// Listeners on the close control and the subscription form.
///
/// Listeners live for the rest of the page, so their closures are leaked.
pub struct WebPageEvents {
  close_button: Element,
  form: HtmlFormElement,
}

impl WebPageEvents {
  pub fn new(close_button: Element, form: HtmlFormElement) -> Self {
    Self { close_button, form }
  }
}

impl PageEvents for WebPageEvents {
  fn on_close_click(&self, handler: Box<dyn Fn()>) {
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
    listen(&self.close_button, "click", callback);
  }

  fn on_form_submit(&self, handler: Box<dyn Fn(ContactForm)>) {
    let form = self.form.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
      event.prevent_default();
      match read_form(&form) {
        Ok(contact_form) => handler(contact_form),
        Err(e) => tracing::warn!(error = %describe_js(&e), "Failed to read signup form"),
      }
    });
    listen(&self.form, "submit", callback);
  }
}

fn listen(target: &Element, event: &str, callback: Closure<dyn FnMut(Event)>) {
  if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
  {
    tracing::error!(event, error = %describe_js(&e), "Failed to register listener");
    return;
  }
  callback.forget();
}

/// Snapshot the form: submitted text entries for named lookup, then every
/// `<input>` value in document order for positional lookup. File entries are skipped.
fn read_form(form: &HtmlFormElement) -> Result<ContactForm, JsValue> {
  let mut contact_form = ContactForm::new();

  let data = FormData::new_with_form(form)?;
  if let Some(entries) = js_sys::try_iter(&data)? {
    for entry in entries {
      let pair = js_sys::Array::from(&entry?);
      if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
        contact_form.push_entry(name, value);
      }
    }
  }

  let inputs = form.query_selector_all("input")?;
  for i in 0..inputs.length() {
    if let Some(input) = inputs
      .item(i)
      .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
    {
      contact_form.push_input(input.value());
    }
  }

  Ok(contact_form)
}
