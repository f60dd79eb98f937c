//! Version command implementation.

/// Build metadata, constructed once in `main` and passed in. No process-wide
/// mutable globals.
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub built: &'static str,
}

impl BuildInfo {
    /// Collects build metadata from compile-time environment variables.
    pub fn from_build_env() -> Self {
        BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GCLOUD_SWITCHER_COMMIT").unwrap_or("none"),
            built: option_env!("GCLOUD_SWITCHER_BUILD_DATE").unwrap_or("unknown"),
        }
    }
}

pub fn print_version(info: &BuildInfo) {
    println!("gcloud-switcher version {}", info.version);
    println!("  commit: {}", info.commit);
    println!("  built at: {}", info.built);
}
