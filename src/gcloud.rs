//! The external gcloud collaborator.
//!
//! Every authentication, project, and configuration-activation operation is
//! delegated to the `gcloud` binary. [`CloudSdk`] captures the contract the
//! rest of the crate depends on; [`GcloudCli`] implements it by spawning the
//! real binary. Tests substitute a double, so nothing above this module ever
//! needs a working gcloud installation.
//!
//! Calls are blocking with no timeout; a hang in gcloud hangs the command.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::paths;

/// Operations gcloud-switcher needs from the cloud SDK.
pub trait CloudSdk {
    /// Whether a native gcloud configuration with this name exists.
    fn configuration_exists(&self, name: &str) -> bool;
    /// Creates a native gcloud configuration without activating it.
    fn create_configuration(&self, name: &str) -> Result<()>;
    /// Activates a native gcloud configuration.
    fn activate_configuration(&self, name: &str) -> Result<()>;
    /// Name of the currently active native configuration; empty if none.
    fn active_configuration_name(&self) -> Result<String>;
    /// Project ID recorded on a native configuration; empty if unset.
    fn project_for_configuration(&self, name: &str) -> Result<String>;
    /// Sets the project on the active native configuration.
    fn set_active_project(&self, project_id: &str) -> Result<()>;
    /// Whether the account session credential is still valid.
    fn account_credential_valid(&self) -> bool;
    /// Whether the Application Default Credentials are still valid.
    fn application_credential_valid(&self) -> bool;
    /// Browser-based end-user login, updating ADC as well.
    fn authenticate_interactively(&self) -> Result<()>;
    /// Login followed by ADC setup impersonating the given service account.
    fn authenticate_as_service_account(&self, identity: &str) -> Result<()>;
    /// Copies the current ADC file to `dest`. Succeeds as a no-op when there
    /// is no ADC file to copy.
    fn snapshot_application_credential(&self, dest: &Path) -> Result<()>;
    /// Copies a saved ADC file back into place. Succeeds as a no-op when the
    /// source is absent.
    fn restore_application_credential(&self, source: &Path) -> Result<()>;
}

/// [`CloudSdk`] backed by the real `gcloud` binary.
///
/// The binary name can be overridden with `GCLOUD_SWITCHER_GCLOUD_BIN`, which
/// the integration tests use to point at a stub.
pub struct GcloudCli {
    binary: OsString,
}

impl GcloudCli {
    pub fn new() -> Self {
        let binary = env::var_os("GCLOUD_SWITCHER_GCLOUD_BIN")
            .unwrap_or_else(|| OsString::from("gcloud"));
        GcloudCli { binary }
    }

    fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    /// Runs a non-interactive gcloud invocation and surfaces stderr on failure.
    fn run(&self, args: &[&str]) -> Result<()> {
        let output = self
            .command()
            .args(args)
            .output()
            .context("failed to execute gcloud")?;
        if !output.status.success() {
            bail!(
                "gcloud {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    /// Runs a gcloud invocation and returns its trimmed stdout.
    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self
            .command()
            .args(args)
            .output()
            .context("failed to execute gcloud")?;
        if !output.status.success() {
            bail!(
                "gcloud {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Runs gcloud with inherited stdio for interactive flows.
    fn run_interactive(&self, args: &[&str]) -> Result<()> {
        let status = self
            .command()
            .args(args)
            .status()
            .context("failed to execute gcloud")?;
        if !status.success() {
            bail!("gcloud {} exited with {}", args.join(" "), status);
        }
        Ok(())
    }

    /// Runs gcloud silently and reports only whether it succeeded.
    fn probe(&self, args: &[&str]) -> bool {
        self.command()
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl Default for GcloudCli {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudSdk for GcloudCli {
    fn configuration_exists(&self, name: &str) -> bool {
        self.probe(&["config", "configurations", "describe", name])
    }

    fn create_configuration(&self, name: &str) -> Result<()> {
        self.run(&["config", "configurations", "create", name, "--no-activate"])
    }

    fn activate_configuration(&self, name: &str) -> Result<()> {
        self.run(&["config", "configurations", "activate", name])
    }

    fn active_configuration_name(&self) -> Result<String> {
        self.run_capture(&[
            "config",
            "configurations",
            "list",
            "--filter=is_active:true",
            "--format=value(name)",
        ])
    }

    fn project_for_configuration(&self, name: &str) -> Result<String> {
        self.run_capture(&[
            "config",
            "configurations",
            "describe",
            name,
            "--format=value(properties.core.project)",
        ])
    }

    fn set_active_project(&self, project_id: &str) -> Result<()> {
        self.run(&["config", "set", "project", project_id, "--quiet"])
    }

    fn account_credential_valid(&self) -> bool {
        self.probe(&["auth", "print-access-token"])
    }

    fn application_credential_valid(&self) -> bool {
        self.probe(&["auth", "application-default", "print-access-token"])
    }

    fn authenticate_interactively(&self) -> Result<()> {
        self.run_interactive(&["auth", "login", "--update-adc"])
    }

    fn authenticate_as_service_account(&self, identity: &str) -> Result<()> {
        // A valid user session is required before impersonated ADC setup.
        self.run_interactive(&["auth", "login"])?;
        self.run_interactive(&[
            "auth",
            "application-default",
            "login",
            "--impersonate-service-account",
            identity,
        ])
    }

    fn snapshot_application_credential(&self, dest: &Path) -> Result<()> {
        let adc = paths::adc_path()?;
        if !adc.exists() {
            return Ok(());
        }
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir)?;
        }
        copy_credential(&adc, dest)
    }

    fn restore_application_credential(&self, source: &Path) -> Result<()> {
        if !source.exists() {
            return Ok(());
        }
        let adc = paths::adc_path()?;
        if let Some(dir) = adc.parent() {
            fs::create_dir_all(dir)?;
        }
        copy_credential(source, &adc)
    }
}

/// Copies a credential file and keeps it readable only by the owner.
fn copy_credential(from: &Path, to: &Path) -> Result<()> {
    let content = fs::read(from)
        .with_context(|| format!("failed to read credential file {}", from.display()))?;
    fs::write(to, content)
        .with_context(|| format!("failed to write credential file {}", to.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(to)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(to, perms)?;
    }
    Ok(())
}
