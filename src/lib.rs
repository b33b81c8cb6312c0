// Dialog lifecycle and submission flow (platform independent)
pub mod signup;

// Browser adapters (only compiled with csr feature)
#[cfg(feature = "csr")]
pub mod web;

pub use signup::{
  ContactClient, ContactForm, DialogPhase, DismissalFlags, NewContact, SignupConfig,
  SignupDialogController, SignupPorts, SubmissionOutcome,
};
