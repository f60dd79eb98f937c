//! Error types for the configuration store and the switch workflow.
//!
//! Store-level failures (`NotFound`, `DuplicateName`, persistence) always
//! propagate to the caller; the workflow adds the fatal external failures
//! (activation, authentication, project setting). Credential snapshot and
//! restore failures are advisory and never appear here - they are logged as
//! warnings where they happen.

use std::io;
use thiserror::Error;

/// Failures raised by [`crate::store::ConfigStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No configuration with the given name exists in the store.
    #[error("configuration '{0}' not found")]
    NotFound(String),

    /// A configuration with the given name already exists.
    #[error("a configuration named '{0}' already exists")]
    DuplicateName(String),

    /// Reading or writing the persisted store failed.
    #[error("failed to persist configuration store")]
    Persistence(#[from] io::Error),
}

/// Fatal failures of the switch workflow.
///
/// Only activation, authentication, and project setting abort a switch;
/// everything else the workflow does is best-effort.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The external gcloud configuration could not be created or activated.
    #[error("failed to activate gcloud configuration '{name}': {reason}")]
    Activation { name: String, reason: String },

    /// Interactive or impersonated authentication failed.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// The active project could not be set after authentication.
    #[error("failed to set project '{project}': {reason}")]
    ProjectSet { project: String, reason: String },
}
