//! Client for the contact registration endpoint

use std::fmt;
use std::rc::Rc;

use super::config::SignupConfig;
use super::contact::NewContact;
use super::error::{FormError, TransportError};
use super::ports::HttpTransport;

/// A JSON POST ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
  pub url: String,
  /// Encoded JSON document, sent with `Content-Type: application/json`
  pub body: String,
  pub include_credentials: bool,
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
  /// Endpoint answered with a 2xx status
  Success { status: u16 },
  /// Request never produced a response
  NetworkFailure(TransportError),
  /// Endpoint answered with a non-2xx status
  RejectedByServer { status: u16 },
  /// Form did not contain the configured fields; nothing was sent
  InvalidForm(FormError),
}

impl SubmissionOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, SubmissionOutcome::Success { .. })
  }

  pub fn from_status(status: u16) -> Self {
    if (200..300).contains(&status) {
      SubmissionOutcome::Success { status }
    } else {
      SubmissionOutcome::RejectedByServer { status }
    }
  }
}

impl fmt::Display for SubmissionOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SubmissionOutcome::Success { status } => write!(f, "subscribed (HTTP {})", status),
      SubmissionOutcome::NetworkFailure(e) => write!(f, "{}", e),
      SubmissionOutcome::RejectedByServer { status } => {
        write!(f, "rejected by server (HTTP {})", status)
      }
      SubmissionOutcome::InvalidForm(e) => write!(f, "invalid form: {}", e),
    }
  }
}

#[derive(Clone)]
pub struct ContactClient {
  endpoint: String,
  include_credentials: bool,
  transport: Rc<dyn HttpTransport>,
}

impl ContactClient {
  pub fn new(
    endpoint: impl Into<String>,
    include_credentials: bool,
    transport: Rc<dyn HttpTransport>,
  ) -> Self {
    Self {
      endpoint: endpoint.into(),
      include_credentials,
      transport,
    }
  }

  pub fn from_config(config: &SignupConfig, transport: Rc<dyn HttpTransport>) -> Self {
    Self::new(config.endpoint.clone(), config.include_credentials, transport)
  }

  pub fn build_request(&self, contact: &NewContact) -> Result<OutboundRequest, TransportError> {
    let body = contact
      .to_json()
      .map_err(|e| TransportError::Request(e.to_string()))?;
    Ok(OutboundRequest {
      url: self.endpoint.clone(),
      body,
      include_credentials: self.include_credentials,
    })
  }

  /// Send one registration. Never fails; every failure is an outcome.
  pub async fn register(&self, contact: &NewContact) -> SubmissionOutcome {
    let request = match self.build_request(contact) {
      Ok(r) => r,
      Err(e) => return SubmissionOutcome::NetworkFailure(e),
    };

    tracing::debug!(
      url = %request.url,
      credentials = request.include_credentials,
      "Posting new contact"
    );

    match self.transport.post_json(&request).await {
      Ok(status) => SubmissionOutcome::from_status(status),
      Err(e) => SubmissionOutcome::NetworkFailure(e),
    }
  }
}
