//! Durable store of named gcloud configurations.
//!
//! The store is a flat, insertion-ordered list of [`Configuration`] records
//! plus the name of the currently active one. It is loaded once per command
//! invocation and written back when mutated. There is no locking; two
//! concurrent invocations racing on the file is last-writer-wins.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::paths;

/// A named pairing of a project ID and an optional service account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub project_id: String,
    /// Identity to impersonate; `None` means end-user credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    /// Saved ADC snapshot for this configuration, if one was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adc_path: Option<PathBuf>,
}

/// The persisted collection of configurations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigStore {
    #[serde(default)]
    pub configurations: Vec<Configuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_config: Option<String>,
    /// Backing file; set on load, never serialized.
    #[serde(skip)]
    path: PathBuf,
}

impl ConfigStore {
    /// Loads the store from its default location (~/.gcloud-switcher/config.json).
    pub fn load() -> Result<Self, StoreError> {
        let path = paths::store_file()?;
        Self::load_from(&path)
    }

    /// Loads the store from an explicit file. A missing file yields an empty
    /// store, not an error.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("no store at {}, starting empty", path.display());
            return Ok(ConfigStore {
                path: path.to_path_buf(),
                ..ConfigStore::default()
            });
        }
        let data = fs::read_to_string(path)?;
        let mut store: ConfigStore = serde_json::from_str(&data).map_err(io::Error::from)?;
        store.path = path.to_path_buf();
        Ok(store)
    }

    /// Writes the store back to its backing file.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// half-written file is never picked up as valid state by a later load.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!("saved {} configuration(s) to {}", self.configurations.len(), self.path.display());
        Ok(())
    }

    /// Finds a configuration by name.
    pub fn find(&self, name: &str) -> Result<&Configuration, StoreError> {
        self.configurations
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Finds a configuration by name, mutably.
    pub fn find_mut(&mut self, name: &str) -> Result<&mut Configuration, StoreError> {
        self.configurations
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Appends a new configuration, preserving insertion order.
    pub fn add(&mut self, config: Configuration) -> Result<(), StoreError> {
        if self.configurations.iter().any(|c| c.name == config.name) {
            return Err(StoreError::DuplicateName(config.name));
        }
        self.configurations.push(config);
        Ok(())
    }

    /// Removes a configuration by name. If it was the active configuration,
    /// the active reference is cleared.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        let idx = self
            .configurations
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.configurations.remove(idx);
        if self.active_config.as_deref() == Some(name) {
            self.active_config = None;
        }
        Ok(())
    }

    /// Overwrites both mutable fields of an existing configuration.
    /// Keep-current semantics are the caller's responsibility.
    pub fn update(
        &mut self,
        name: &str,
        project_id: &str,
        service_account: Option<&str>,
    ) -> Result<(), StoreError> {
        let config = self.find_mut(name)?;
        config.project_id = project_id.to_string();
        config.service_account = service_account.map(str::to_string);
        Ok(())
    }

    /// Marks a configuration as active. The caller has already verified the
    /// name exists.
    pub fn set_active(&mut self, name: &str) {
        self.active_config = Some(name.to_string());
    }

    /// Returns the active configuration record, if any.
    pub fn active(&self) -> Option<&Configuration> {
        let name = self.active_config.as_deref()?;
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Derives the ADC snapshot location for a configuration, next to the
    /// store file. Deterministic in the configuration name.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        dir.join(format!("{name}.adc.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(name: &str, project: &str) -> Configuration {
        Configuration {
            name: name.to_string(),
            project_id: project.to_string(),
            service_account: None,
            adc_path: None,
        }
    }

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::load_from(&dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn add_then_find_returns_identical_record() {
        let mut store = ConfigStore::default();
        let mut cfg = config("dev", "dev-1");
        cfg.service_account = Some("sa@x.iam".to_string());
        store.add(cfg.clone()).unwrap();

        assert_eq!(store.find("dev").unwrap(), &cfg);
    }

    #[test]
    fn add_duplicate_fails_and_leaves_store_unchanged() {
        let mut store = ConfigStore::default();
        store.add(config("dev", "dev-1")).unwrap();

        let err = store.add(config("dev", "dev-2")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "dev"));
        assert_eq!(store.configurations.len(), 1);
        assert_eq!(store.find("dev").unwrap().project_id, "dev-1");
    }

    #[test]
    fn remove_active_clears_active_reference() {
        let mut store = ConfigStore::default();
        store.add(config("dev", "dev-1")).unwrap();
        store.add(config("prod", "prod-1")).unwrap();
        store.set_active("dev");

        store.remove("dev").unwrap();
        assert_eq!(store.active_config, None);
        assert!(store.find("prod").is_ok());
    }

    #[test]
    fn remove_non_active_keeps_active_reference() {
        let mut store = ConfigStore::default();
        store.add(config("dev", "dev-1")).unwrap();
        store.add(config("prod", "prod-1")).unwrap();
        store.set_active("dev");

        store.remove("prod").unwrap();
        assert_eq!(store.active_config.as_deref(), Some("dev"));
    }

    #[test]
    fn remove_absent_fails_and_leaves_store_unchanged() {
        let mut store = ConfigStore::default();
        store.add(config("dev", "dev-1")).unwrap();
        store.set_active("dev");

        let err = store.remove("missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.configurations.len(), 1);
        assert_eq!(store.active_config.as_deref(), Some("dev"));
    }

    #[test]
    fn update_overwrites_both_fields() {
        let mut store = ConfigStore::default();
        let mut cfg = config("dev", "dev-1");
        cfg.service_account = Some("old@x.iam".to_string());
        store.add(cfg).unwrap();

        store.update("dev", "dev-2", None).unwrap();
        let updated = store.find("dev").unwrap();
        assert_eq!(updated.project_id, "dev-2");
        assert_eq!(updated.service_account, None);
    }

    #[test]
    fn update_absent_fails_with_not_found() {
        let mut store = ConfigStore::default();
        let err = store.update("missing", "p", None).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn serde_round_trip_preserves_records_and_order() {
        let mut store = ConfigStore::default();
        let mut dev = config("dev", "dev-1");
        dev.service_account = Some("dev@x.iam".to_string());
        store.add(dev).unwrap();
        store.add(config("prod", "prod-1")).unwrap();
        store.set_active("dev");

        let json = serde_json::to_string_pretty(&store).unwrap();
        let loaded: ConfigStore = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.configurations, store.configurations);
        assert_eq!(loaded.active_config, store.active_config);
    }

    #[test]
    fn serde_round_trip_of_empty_store() {
        let json = serde_json::to_string(&ConfigStore::default()).unwrap();
        let loaded: ConfigStore = serde_json::from_str(&json).unwrap();
        assert!(loaded.configurations.is_empty());
        assert_eq!(loaded.active_config, None);
    }

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let mut store = ConfigStore::default();
        store.add(config("dev", "dev-1")).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        assert!(!json.contains("service_account"));
        assert!(!json.contains("active_config"));
    }

    #[test]
    fn unknown_fields_are_ignored_on_read() {
        let json = r#"{
            "configurations": [
                {"name": "dev", "project_id": "dev-1", "color": "blue"}
            ],
            "active_config": "dev",
            "schema_version": 2
        }"#;
        let store: ConfigStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.find("dev").unwrap().project_id, "dev-1");
        assert_eq!(store.active_config.as_deref(), Some("dev"));
    }

    #[test]
    fn load_missing_file_returns_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.configurations.is_empty());
        assert_eq!(store.active_config, None);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.add(config("dev", "dev-1")).unwrap();
        store.set_active("dev");
        store.save().unwrap();

        let loaded = store_in(&dir);
        assert_eq!(loaded.configurations, store.configurations);
        assert_eq!(loaded.active_config.as_deref(), Some("dev"));
        // the temp file from the atomic write must not linger
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigStore::load_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
    }

    #[test]
    fn snapshot_path_is_derived_from_store_location_and_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.snapshot_path("dev"), dir.path().join("dev.adc.json"));
    }
}
