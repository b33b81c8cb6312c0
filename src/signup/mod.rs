//! Signup dialog module
//!
//! Provides the modal subscription prompt shown to visitors:
//! - Timed auto-display of a single dialog surface
//! - Close handling with a session-scoped dismissal flag
//! - Form relay to the contact endpoint with a durable dismissal flag on success
//!
//! Everything that touches the browser sits behind the traits in [`ports`], so
//! the controller runs unchanged against web-sys adapters or in-process fakes.

pub mod client;
pub mod config;
pub mod contact;
mod controller;
pub mod dismissal;
pub mod error;
pub mod memory;
pub mod ports;

pub use client::{ContactClient, OutboundRequest, SubmissionOutcome};
pub use config::{ElementIds, FieldSelectors, LoggingSection, SignupConfig, StatusTexts};
pub use contact::{ContactForm, FieldSelector, NewContact};
pub use controller::{DialogPhase, SignupDialogController, SignupPorts};
pub use dismissal::DismissalFlags;
pub use error::{ConfigError, FormError, StoreError, SurfaceError, TransportError};
pub use memory::MemoryStore;
