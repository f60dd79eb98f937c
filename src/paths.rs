//! Filesystem locations used by gcloud-switcher.
//!
//! For testing, two environment variables override the defaults:
//! `GCLOUD_SWITCHER_HOME` relocates the storage directory and
//! `GCLOUD_SWITCHER_GCLOUD_DIR` relocates the gcloud configuration directory
//! that holds the Application Default Credentials file.

use anyhow::{Result, bail};
use std::env;
use std::io;
use std::path::PathBuf;

/// Validates a configuration name.
///
/// Snapshot filenames are derived from configuration names, so names must be
/// safe path components. Rejects names that:
/// - Are empty
/// - Are `.` or `..`, or start with a dot
/// - Contain path separators (`/` or `\`)
/// - Contain control characters
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Configuration name cannot be empty.");
    }
    if name == "." || name == ".." {
        bail!("Configuration name cannot be '.' or '..'.");
    }
    if name.starts_with('.') {
        bail!("Configuration name cannot start with a dot.");
    }
    if name.contains('/') || name.contains('\\') {
        bail!("Configuration name cannot contain path separators ('/' or '\\').");
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        bail!("Configuration name cannot contain control characters.");
    }
    Ok(())
}

fn home() -> io::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))
}

/// Returns the gcloud-switcher storage directory (~/.gcloud-switcher).
pub fn store_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = env::var("GCLOUD_SWITCHER_HOME") {
        return Ok(PathBuf::from(dir));
    }
    Ok(home()?.join(".gcloud-switcher"))
}

/// Returns the path of the persisted configuration store.
pub fn store_file() -> io::Result<PathBuf> {
    Ok(store_dir()?.join("config.json"))
}

/// Returns the gcloud configuration directory (~/.config/gcloud).
pub fn gcloud_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = env::var("GCLOUD_SWITCHER_GCLOUD_DIR") {
        return Ok(PathBuf::from(dir));
    }
    Ok(home()?.join(".config").join("gcloud"))
}

/// Returns the path of the Application Default Credentials file.
pub fn adc_path() -> io::Result<PathBuf> {
    Ok(gcloud_dir()?.join("application_default_credentials.json"))
}
