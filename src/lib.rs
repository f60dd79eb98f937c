//! # gcloud-switcher
//!
//! A CLI for managing named gcloud configurations - each a project ID plus an
//! optional service account to impersonate - and switching between them with
//! a single command.
//!
//! ## Problem
//!
//! Juggling several GCP projects means re-running `gcloud config` and
//! `gcloud auth` commands and re-authenticating ADC (Application Default
//! Credentials) on every change, because ADC lives in a single file.
//!
//! ## Solution
//!
//! `gcloud-switcher` keeps a small JSON store of configurations, snapshots
//! the ADC file per configuration, and drives the `gcloud` binary through
//! the whole activate / restore / authenticate / set-project sequence when
//! switching.

pub mod commands;
pub mod error;
pub mod gcloud;
pub mod paths;
pub mod prompt;
pub mod store;
pub mod workflow;

// Re-export commonly used items
pub use error::{StoreError, SwitchError};
pub use gcloud::{CloudSdk, GcloudCli};
pub use store::{ConfigStore, Configuration};
pub use workflow::switch_configuration;
