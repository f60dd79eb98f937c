//! Switch command implementation.

use anyhow::Result;

use crate::gcloud::CloudSdk;
use crate::prompt::InputProvider;
use crate::store::ConfigStore;
use crate::workflow::switch_configuration;

/// Switches to a configuration, offering an interactive selection when no
/// name was given.
pub fn switch_command(
    store: &mut ConfigStore,
    sdk: &dyn CloudSdk,
    input: &dyn InputProvider,
    name: Option<String>,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => {
            let names: Vec<String> = store
                .configurations
                .iter()
                .map(|c| c.name.clone())
                .collect();
            if names.is_empty() {
                println!("No configurations found. Use 'gcloud-switcher add <name>' to create one.");
                return Ok(());
            }
            let index = input.select("Select configuration", &names)?;
            names[index].clone()
        }
    };

    switch_configuration(store, sdk, &name)?;
    println!("Switched to configuration '{}'.", name);
    Ok(())
}
