//! List command implementation.

use crate::store::ConfigStore;

/// Prints all configurations with the active one marked.
pub fn list_configurations(store: &ConfigStore) {
    if store.configurations.is_empty() {
        println!("No configurations found. Use 'gcloud-switcher add <name>' to create one.");
        return;
    }

    for config in &store.configurations {
        let marker = if store.active_config.as_deref() == Some(config.name.as_str()) {
            " (active)"
        } else {
            ""
        };
        println!("{}{}", config.name, marker);
        println!("  project: {}", config.project_id);
        match &config.service_account {
            Some(sa) => println!("  service account: {}", sa),
            None => println!("  service account: (none - using user credentials)"),
        }
    }
}
