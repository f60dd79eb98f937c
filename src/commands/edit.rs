//! Edit command implementation.

use anyhow::Result;
use log::{info, warn};

use crate::gcloud::CloudSdk;
use crate::prompt::InputProvider;
use crate::store::ConfigStore;

/// Updates the project ID or service account of an existing configuration.
///
/// Fields not given as flags are prompted for; an empty answer keeps the
/// current value. Passing `--service-account ""` clears the account. When the
/// project changed and a native gcloud configuration of the same name exists,
/// the new project is pushed into it as well, best-effort.
pub fn edit_configuration(
    store: &mut ConfigStore,
    sdk: &dyn CloudSdk,
    input: &dyn InputProvider,
    name: &str,
    project: Option<String>,
    service_account: Option<String>,
) -> Result<()> {
    let current = store.find(name)?.clone();

    println!("Editing configuration '{}'", name);
    println!("  current project: {}", current.project_id);
    match &current.service_account {
        Some(sa) => println!("  current service account: {}", sa),
        None => println!("  current service account: (none)"),
    }

    let project_id = match project {
        Some(p) if !p.is_empty() => p,
        _ => {
            let answer = input.text("New project ID (press Enter to keep current)")?;
            if answer.is_empty() {
                current.project_id.clone()
            } else {
                answer
            }
        }
    };

    let service_account = match service_account {
        // An explicit flag wins; empty clears the account.
        Some(sa) => Some(sa).filter(|s| !s.is_empty()),
        None => {
            let answer = input.text("New service account (press Enter to keep current)")?;
            if answer.is_empty() {
                current.service_account.clone()
            } else {
                Some(answer)
            }
        }
    };

    store.update(name, &project_id, service_account.as_deref())?;
    store.save()?;

    let project_changed = project_id != current.project_id;
    if project_changed && sdk.configuration_exists(name) {
        push_project_to_native_configuration(sdk, name, &project_id);
    }

    println!("Updated configuration '{}' (project: {}).", name, project_id);
    match &service_account {
        Some(sa) => println!("  service account: {}", sa),
        None => println!("  service account: (none)"),
    }
    Ok(())
}

/// Updates the project on the native configuration without disturbing
/// whichever configuration was active. Every step is advisory; the store is
/// already saved.
fn push_project_to_native_configuration(sdk: &dyn CloudSdk, name: &str, project_id: &str) {
    info!("updating native gcloud configuration with new project ID");

    let previously_active = sdk.active_configuration_name().unwrap_or_default();

    let mut restore = None;
    if previously_active != name {
        match sdk.activate_configuration(name) {
            Ok(()) => restore = Some(previously_active).filter(|p| !p.is_empty()),
            Err(err) => warn!("failed to activate configuration for update: {err:#}"),
        }
    }

    if let Err(err) = sdk.set_active_project(project_id) {
        warn!("failed to update project in native gcloud configuration: {err:#}");
    }

    if let Some(previous) = restore {
        if let Err(err) = sdk.activate_configuration(&previous) {
            warn!("failed to restore previously active configuration '{previous}': {err:#}");
        }
    }
}
