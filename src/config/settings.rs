//! Process-wide runtime settings.
//!
//! Built once in `main` from CLI flags and the environment, then passed by
//! reference to everything that needs it.

use std::path::PathBuf;
use std::time::Duration;

use super::file::ConfigFile;

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable that can turn version checks off.
pub const VERSION_CHECK_ENV: &str = "DOPPLER_ENABLE_VERSION_CHECK";

/// Runtime settings shared by all components.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output additional information (and raw script output).
    pub debug: bool,

    /// Output JSON; suppresses update prompts.
    pub json: bool,

    /// Timeout for API requests (`None` = wait forever).
    pub timeout: Option<Duration>,

    /// Verify TLS certificates on HTTP requests.
    pub verify_tls: bool,

    /// Whether automatic version checks may run.
    pub perform_version_check: bool,

    /// Whether this is a development build.
    pub development: bool,

    /// Path to the user configuration file.
    pub config_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            json: false,
            timeout: Some(DEFAULT_TIMEOUT),
            verify_tls: true,
            perform_version_check: true,
            development: false,
            config_path: ConfigFile::default_path(),
        }
    }
}

/// Interpret `DOPPLER_ENABLE_VERSION_CHECK`.
///
/// Unset or unrecognized values leave checks enabled.
pub fn version_check_enabled_by_env(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) => !matches!(v.as_str(), "false" | "0" | "no" | "off"),
        None => true,
    }
}
