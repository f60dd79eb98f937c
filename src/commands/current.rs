//! Current command implementation.

use anyhow::Result;

use crate::gcloud::CloudSdk;
use crate::store::ConfigStore;

/// Shows the tracked active configuration alongside what gcloud itself
/// considers active, plus an ADC validity report.
pub fn show_current(store: &ConfigStore, sdk: &dyn CloudSdk) -> Result<()> {
    if let Ok(native) = sdk.active_configuration_name() {
        if !native.is_empty() {
            println!("gcloud active configuration: {}", native);
        }
    }

    let Some(config) = store.active() else {
        println!("No active configuration tracked by gcloud-switcher.");
        return Ok(());
    };

    println!("Current configuration: {}", config.name);
    println!("  project: {}", config.project_id);
    match &config.service_account {
        Some(sa) => println!("  service account: {}", sa),
        None => println!("  service account: (none - using user credentials)"),
    }

    if sdk.application_credential_valid() {
        println!("ADC credentials are valid.");
    } else {
        println!("ADC credentials are invalid or expired.");
    }
    Ok(())
}
