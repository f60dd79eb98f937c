//! The configuration-switch workflow.
//!
//! Moves the active designation from whatever configuration is current to a
//! target, keeping credentials continuous across the switch. The sequence is
//! strictly linear; only activation, authentication, and project setting are
//! fatal. Losing a credential snapshot merely costs a future login prompt,
//! so every snapshot and restore step is best-effort and logged.

use log::{info, warn};

use crate::error::SwitchError;
use crate::gcloud::CloudSdk;
use crate::store::ConfigStore;

/// Switches the active configuration to `name` and persists the store.
///
/// Fails with [`SwitchError::Store`] (`NotFound`) before any external call
/// when the target is not in the store. Authentication happens after
/// activation so the right native configuration receives the credential, and
/// before project setting so the project change sticks to a valid session.
pub fn switch_configuration(
    store: &mut ConfigStore,
    sdk: &dyn CloudSdk,
    name: &str,
) -> Result<(), SwitchError> {
    let target = store.find(name)?.clone();
    info!("switching to configuration '{}' (project {})", target.name, target.project_id);

    // Save the outgoing configuration's ADC so switching back skips a login.
    let outgoing = store.active_config.clone().filter(|active| active != name);
    if let Some(previous) = outgoing {
        if store.find(&previous).is_ok() {
            let dest = store.snapshot_path(&previous);
            info!("saving ADC for configuration '{previous}'");
            match sdk.snapshot_application_credential(&dest) {
                Ok(()) => {
                    if let Ok(config) = store.find_mut(&previous) {
                        config.adc_path = Some(dest);
                    }
                }
                Err(err) => warn!("failed to save ADC for '{previous}': {err:#}"),
            }
        }
    }

    // The native configuration must exist before it can be activated.
    if !sdk.configuration_exists(name) {
        info!("creating gcloud configuration '{name}'");
        sdk.create_configuration(name)
            .map_err(|err| SwitchError::Activation {
                name: name.to_string(),
                reason: format!("{err:#}"),
            })?;
    }

    sdk.activate_configuration(name)
        .map_err(|err| SwitchError::Activation {
            name: name.to_string(),
            reason: format!("{err:#}"),
        })?;
    info!("configuration activated");

    if let Some(saved) = &target.adc_path {
        info!("restoring saved ADC credentials for '{name}'");
        if let Err(err) = sdk.restore_application_credential(saved) {
            warn!("failed to restore ADC for '{name}': {err:#}");
        }
    }

    let account_valid = sdk.account_credential_valid();
    let application_valid = sdk.application_credential_valid();
    if !account_valid || !application_valid {
        if !account_valid {
            info!("account credentials are invalid or expired");
        }
        if !application_valid {
            info!("ADC credentials are invalid or expired");
        }
        match &target.service_account {
            Some(identity) => {
                info!("authenticating with service account '{identity}'");
                sdk.authenticate_as_service_account(identity)
            }
            None => {
                info!("authenticating with user credentials");
                sdk.authenticate_interactively()
            }
        }
        .map_err(|err| SwitchError::Authentication {
            reason: format!("{err:#}"),
        })?;
        info!("authentication successful");

        // Keep a snapshot of the freshly minted ADC for this configuration.
        let dest = store.snapshot_path(name);
        match sdk.snapshot_application_credential(&dest) {
            Ok(()) => {
                if let Ok(config) = store.find_mut(name) {
                    config.adc_path = Some(dest);
                }
            }
            Err(err) => warn!("failed to save new ADC for '{name}': {err:#}"),
        }
    } else {
        info!("using existing valid credentials");
    }

    sdk.set_active_project(&target.project_id)
        .map_err(|err| SwitchError::ProjectSet {
            project: target.project_id.clone(),
            reason: format!("{err:#}"),
        })?;

    store.set_active(name);
    store.save()?;
    Ok(())
}
