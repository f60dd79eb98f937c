//! Add command implementation.

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::gcloud::CloudSdk;
use crate::paths::validate_name;
use crate::prompt::InputProvider;
use crate::store::{ConfigStore, Configuration};

/// Creates a new configuration, prompting for fields not given as flags.
///
/// If a native gcloud configuration with the same name already exists, its
/// project ID is imported instead of prompting and the native configuration
/// is left as-is; otherwise one is created.
pub fn add_configuration(
    store: &mut ConfigStore,
    sdk: &dyn CloudSdk,
    input: &dyn InputProvider,
    name: &str,
    project: Option<String>,
    service_account: Option<String>,
) -> Result<()> {
    validate_name(name)?;

    let native_exists = sdk.configuration_exists(name);

    let project_id = if native_exists {
        info!("found existing gcloud configuration '{name}'");
        match sdk.project_for_configuration(name) {
            Ok(existing) if !existing.is_empty() => {
                if let Some(flag) = project.as_deref() {
                    if flag != existing {
                        warn!(
                            "ignoring provided project '{flag}', using existing configuration's project '{existing}'"
                        );
                    }
                }
                existing
            }
            _ => {
                warn!("could not retrieve project from existing configuration");
                require_project(input, project)?
            }
        }
    } else {
        require_project(input, project)?
    };

    let service_account = match service_account {
        Some(sa) => Some(sa).filter(|s| !s.is_empty()),
        // Importing an existing configuration: the account can be added later
        // with 'edit'.
        None if native_exists => None,
        None => {
            let answer = input.text("Service account (optional, press Enter to skip)")?;
            Some(answer).filter(|s| !s.is_empty())
        }
    };

    store.add(Configuration {
        name: name.to_string(),
        project_id: project_id.clone(),
        service_account: service_account.clone(),
        adc_path: None,
    })?;

    if !native_exists {
        info!("creating gcloud configuration '{name}'");
        sdk.create_configuration(name)
            .context("failed to create gcloud configuration")?;
    }

    store.save()?;

    if native_exists {
        println!("Imported existing configuration '{}' (project: {}).", name, project_id);
    } else {
        println!("Added configuration '{}' (project: {}).", name, project_id);
    }
    match &service_account {
        Some(sa) => println!("  service account: {}", sa),
        None => println!(
            "  No service account set. Use 'gcloud-switcher edit {}' to add one if needed.",
            name
        ),
    }
    Ok(())
}

fn require_project(input: &dyn InputProvider, flag: Option<String>) -> Result<String> {
    if let Some(project) = flag.filter(|p| !p.is_empty()) {
        return Ok(project);
    }
    let answer = input.text("Project ID")?;
    if answer.is_empty() {
        bail!("a project ID is required");
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcloud::testing::FakeSdk;
    use crate::prompt::testing::Scripted;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::load_from(&dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn prompts_for_missing_fields_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let sdk = FakeSdk::default();
        let input = Scripted::new(["my-proj", "sa@x.iam"]);

        add_configuration(&mut store, &sdk, &input, "dev", None, None).unwrap();

        let added = store.find("dev").unwrap();
        assert_eq!(added.project_id, "my-proj");
        assert_eq!(added.service_account.as_deref(), Some("sa@x.iam"));
        assert!(sdk.called("create:dev"));

        let reloaded = store_in(&dir);
        assert!(reloaded.find("dev").is_ok());
    }

    #[test]
    fn empty_service_account_answer_means_none() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let sdk = FakeSdk::default();
        let input = Scripted::new([""]);

        add_configuration(&mut store, &sdk, &input, "dev", Some("p-1".to_string()), None).unwrap();
        assert_eq!(store.find("dev").unwrap().service_account, None);
    }

    #[test]
    fn imports_project_from_existing_native_configuration() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut sdk = FakeSdk {
            existing: vec!["dev".to_string()],
            ..FakeSdk::default()
        };
        sdk.projects.insert("dev".to_string(), "imported-1".to_string());
        let input = Scripted::new([]);

        add_configuration(&mut store, &sdk, &input, "dev", None, None).unwrap();

        assert_eq!(store.find("dev").unwrap().project_id, "imported-1");
        assert!(!sdk.called("create:dev"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let sdk = FakeSdk::default();
        let input = Scripted::new([]);

        add_configuration(&mut store, &sdk, &input, "dev", Some("p-1".to_string()), Some(String::new())).unwrap();
        let err = add_configuration(&mut store, &sdk, &input, "dev", Some("p-2".to_string()), Some(String::new()))
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn empty_project_answer_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let sdk = FakeSdk::default();
        let input = Scripted::new([""]);

        let err = add_configuration(&mut store, &sdk, &input, "dev", None, None).unwrap_err();
        assert!(err.to_string().contains("required"));
        assert!(store.find("dev").is_err());
    }

    #[test]
    fn invalid_name_is_rejected_before_any_external_call() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let sdk = FakeSdk::default();
        let input = Scripted::new([]);

        let err = add_configuration(&mut store, &sdk, &input, "a/b", None, None).unwrap_err();
        assert!(err.to_string().contains("path separators"));
        assert!(sdk.calls().is_empty());
    }
}
