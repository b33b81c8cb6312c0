//! Contact payload and submitted form snapshot

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::FieldSelectors;
use super::error::FormError;

/// Body of the contact registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
}

impl NewContact {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: last_name.into(),
      email: email.into(),
    }
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}

/// Locates one form field: by submitted name, or by position among the form's `<input>` elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelector {
  Position(usize),
  Name(String),
}

impl fmt::Display for FieldSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldSelector::Position(p) => write!(f, "#{}", p),
      FieldSelector::Name(n) => write!(f, "{}", n),
    }
  }
}

/// Snapshot of a submitted form.
///
/// Named lookups read the submitted entries (what `FormData` yields). Positional
/// lookups read the values of the form's `<input>` elements in document order,
/// including unnamed and disabled inputs and excluding selects and textareas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
  entries: Vec<(String, String)>,
  inputs: Vec<String>,
}

impl ContactForm {
  pub fn new() -> Self {
    Self::default()
  }

  /// A named text input: both a submitted entry and a positional input
  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    let value = value.into();
    self.push_input(value.clone());
    self.push_entry(name, value);
    self
  }

  /// A submitted entry with no `<input>` behind it (select, textarea)
  pub fn with_entry(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.push_entry(name, value);
    self
  }

  /// An `<input>` that submits nothing (unnamed, disabled, unchecked)
  pub fn with_input(mut self, value: impl Into<String>) -> Self {
    self.push_input(value);
    self
  }

  pub fn push_entry(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.entries.push((name.into(), value.into()));
  }

  pub fn push_input(&mut self, value: impl Into<String>) {
    self.inputs.push(value.into());
  }

  pub fn input_count(&self) -> usize {
    self.inputs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty() && self.inputs.is_empty()
  }

  /// First value submitted under `name`
  pub fn value(&self, name: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v.as_str())
  }

  pub fn select(&self, selector: &FieldSelector) -> Result<&str, FormError> {
    match selector {
      FieldSelector::Name(name) => self
        .value(name)
        .ok_or_else(|| FormError::MissingField(name.clone())),
      FieldSelector::Position(position) => self
        .inputs
        .get(*position)
        .map(String::as_str)
        .ok_or(FormError::MissingPosition {
          position: *position,
          count: self.inputs.len(),
        }),
    }
  }

  pub fn to_contact(&self, fields: &FieldSelectors) -> Result<NewContact, FormError> {
    Ok(NewContact {
      first_name: self.select(&fields.first_name)?.to_string(),
      last_name: self.select(&fields.last_name)?.to_string(),
      email: self.select(&fields.email)?.to_string(),
    })
  }
}

/// Collects named text inputs, as [`ContactForm::with`] does
impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ContactForm {
  fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
    iter
      .into_iter()
      .fold(ContactForm::new(), |form, (n, v)| form.with(n, v))
  }
}
