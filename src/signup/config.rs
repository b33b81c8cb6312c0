//! Signup dialog configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::contact::FieldSelector;
use super::error::ConfigError;

/// Largest delay `setTimeout` honors; larger values wrap negative and fire at once
pub const MAX_DELAY_MS: u64 = i32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupConfig {
  /// Contact registration endpoint (POST, JSON body)
  #[serde(default = "default_endpoint")]
  pub endpoint: String,

  /// Send cookies with the registration request
  #[serde(default)]
  pub include_credentials: bool,

  /// Delay between initialization and auto-display
  #[serde(default = "default_auto_open_delay_ms")]
  pub auto_open_delay_ms: u64,

  /// Delay between a successful submission and closing the dialog (0 = immediate)
  #[serde(default = "default_close_delay_ms")]
  pub close_delay_ms: u64,

  /// Skip auto-display when either dismissal flag is already set
  #[serde(default)]
  pub respect_dismissal: bool,

  /// Key used for both dismissal flags
  #[serde(default = "default_storage_key")]
  pub storage_key: String,

  #[serde(default)]
  pub elements: ElementIds,
  #[serde(default)]
  pub fields: FieldSelectors,
  #[serde(default)]
  pub status: StatusTexts,
  #[serde(default)]
  pub logging: LoggingSection,
}

fn default_endpoint() -> String {
  "https://api.bytepad.shop/new-contact".into()
}

fn default_auto_open_delay_ms() -> u64 {
  2000
}

fn default_close_delay_ms() -> u64 {
  500
}

fn default_storage_key() -> String {
  "dialogClosedByUser".into()
}

impl Default for SignupConfig {
  fn default() -> Self {
    Self {
      endpoint: default_endpoint(),
      include_credentials: false,
      auto_open_delay_ms: default_auto_open_delay_ms(),
      close_delay_ms: default_close_delay_ms(),
      respect_dismissal: false,
      storage_key: default_storage_key(),
      elements: ElementIds::default(),
      fields: FieldSelectors::default(),
      status: StatusTexts::default(),
      logging: LoggingSection::default(),
    }
  }
}

impl SignupConfig {
  /// Parse and validate a config document. JSON documents are accepted too.
  pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
    let config: SignupConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
      return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
    }

    for (name, value) in [
      ("auto_open_delay_ms", self.auto_open_delay_ms),
      ("close_delay_ms", self.close_delay_ms),
    ] {
      if value > MAX_DELAY_MS {
        return Err(ConfigError::DelayOutOfRange {
          name,
          value,
          max: MAX_DELAY_MS,
        });
      }
    }

    for (name, selector) in [
      ("first_name", &self.fields.first_name),
      ("last_name", &self.fields.last_name),
      ("email", &self.fields.email),
    ] {
      if let FieldSelector::Name(n) = selector {
        if n.trim().is_empty() {
          return Err(ConfigError::EmptyFieldSelector(name));
        }
      }
    }

    Ok(())
  }

  pub fn auto_open_delay(&self) -> Duration {
    Duration::from_millis(self.auto_open_delay_ms)
  }

  /// `None` means close right away
  pub fn close_delay(&self) -> Option<Duration> {
    (self.close_delay_ms > 0).then(|| Duration::from_millis(self.close_delay_ms))
  }
}

/// DOM ids the browser adapters bind to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
  #[serde(default = "default_dialog_id")]
  pub dialog: String,
  #[serde(default = "default_close_button_id")]
  pub close_button: String,
  #[serde(default = "default_form_id")]
  pub form: String,
  /// Element whose text tracks submission progress
  #[serde(default = "default_status_label_id")]
  pub status_label: Option<String>,
}

fn default_dialog_id() -> String {
  "onLoadSignupPopup".into()
}

fn default_close_button_id() -> String {
  "loadSignupPopupCloseButton".into()
}

fn default_form_id() -> String {
  "sib-form".into()
}

fn default_status_label_id() -> Option<String> {
  Some("sib-form-submit-button".into())
}

impl Default for ElementIds {
  fn default() -> Self {
    Self {
      dialog: default_dialog_id(),
      close_button: default_close_button_id(),
      form: default_form_id(),
      status_label: default_status_label_id(),
    }
  }
}

/// Where each payload field is read from in the submitted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelectors {
  #[serde(default = "default_first_name_field")]
  pub first_name: FieldSelector,
  #[serde(default = "default_last_name_field")]
  pub last_name: FieldSelector,
  #[serde(default = "default_email_field")]
  pub email: FieldSelector,
}

fn default_first_name_field() -> FieldSelector {
  FieldSelector::Name("FIRSTNAME".into())
}

fn default_last_name_field() -> FieldSelector {
  FieldSelector::Name("LASTNAME".into())
}

fn default_email_field() -> FieldSelector {
  FieldSelector::Name("EMAIL".into())
}

impl Default for FieldSelectors {
  fn default() -> Self {
    Self {
      first_name: default_first_name_field(),
      last_name: default_last_name_field(),
      email: default_email_field(),
    }
  }
}

/// Status label texts. On failure the label gets back the text it had before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTexts {
  #[serde(default = "default_in_progress_text")]
  pub in_progress: String,
  #[serde(default = "default_done_text")]
  pub done: String,
}

fn default_in_progress_text() -> String {
  "SUBSCRIBING...".into()
}

fn default_done_text() -> String {
  "SUBSCRIBED".into()
}

impl Default for StatusTexts {
  fn default() -> Self {
    Self {
      in_progress: default_in_progress_text(),
      done: default_done_text(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
  /// tracing filter directive, e.g. "info" or "bytepad_signup=debug"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".into()
}

impl Default for LoggingSection {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}
