//! Remove command implementation.

use anyhow::Result;
use log::warn;
use std::fs;
use std::io;

use crate::store::ConfigStore;

/// Removes a configuration and its saved ADC snapshot.
///
/// The native gcloud configuration is deliberately left in place; the user
/// may still want it.
pub fn remove_configuration(store: &mut ConfigStore, name: &str) -> Result<()> {
    if let Ok(config) = store.find(name) {
        if let Some(snapshot) = &config.adc_path {
            if let Err(err) = fs::remove_file(snapshot) {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("failed to remove saved ADC file {}: {err}", snapshot.display());
                }
            }
        }
    }

    store.remove(name)?;
    store.save()?;

    println!("Removed configuration '{}'.", name);
    println!(
        "Note: the native gcloud configuration still exists. Delete it manually if needed with: \
        gcloud config configurations delete {}",
        name
    );
    Ok(())
}
