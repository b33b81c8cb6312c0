//! Error types for the signup dialog

use thiserror::Error;

/// Errors raised while loading or validating [`SignupConfig`](super::SignupConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to parse signup config: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("Invalid endpoint: {0} (must start with http:// or https://)")]
  InvalidEndpoint(String),

  #[error("Delay too large for {name}: {value}ms > {max}ms")]
  DelayOutOfRange { name: &'static str, value: u64, max: u64 },

  #[error("Empty selector for form field {0}")]
  EmptyFieldSelector(&'static str),
}

/// Errors from a key/value store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("Storage unavailable: {0}")]
  Unavailable(String),

  #[error("Failed to write {key}: {reason}")]
  WriteRejected { key: String, reason: String },
}

/// Errors from the dialog surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
  #[error("Dialog refused modal presentation: {0}")]
  ShowRejected(String),
}

/// Errors reading the contact payload out of a submitted form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
  #[error("Form has no field named {0}")]
  MissingField(String),

  #[error("Form has no field at position {position} ({count} fields submitted)")]
  MissingPosition { position: usize, count: usize },
}

/// Errors from the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
  #[error("Failed to build request: {0}")]
  Request(String),

  #[error("Network error: {0}")]
  Network(String),
}
