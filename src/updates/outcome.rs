//! Interpreting install script results.
//!
//! On success the script prints exactly one `Installed Doppler CLI v<semver>`
//! line. On failure the exit code (and occasionally the output) tells us
//! what went wrong:
//!
//! | exit code | meaning                                  |
//! |-----------|------------------------------------------|
//! | 1         | generic failure                          |
//! | 2         | insufficient permissions                 |
//! | 3         | gpg binary missing                       |
//! | 4         | `~/.gnupg` not readable by current user  |

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DopplerError, Result};

use super::version::SemanticVersion;

/// Matches the success line, e.g. `Installed Doppler CLI v3.7.1`.
static INSTALLED_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Installed Doppler CLI v(\d+\.\d+\.\d+)")
        .expect("INSTALLED_VERSION_REGEX must compile")
});

/// Printed by dpkg when the script was run without root.
const DPKG_SUPERUSER_ERROR: &str = "dpkg: error: requested operation requires superuser privilege";

/// Extract the installed version from script output.
///
/// Exactly one success line must be present; zero or several is ambiguous.
pub fn parse_installed_version(output: &str) -> Result<SemanticVersion> {
    let captures: Vec<&str> = INSTALLED_VERSION_REGEX
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();

    let [version] = captures.as_slice() else {
        tracing::debug!(
            "Found {} installed-version lines in script output",
            captures.len()
        );
        return Err(DopplerError::Parse {
            message: "Unable to determine new CLI version".to_string(),
            source: None,
        });
    };

    SemanticVersion::parse(version).map_err(|e| DopplerError::Parse {
        message: "Unable to parse new CLI version".to_string(),
        source: Some(e),
    })
}

/// Why the install script failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallFailure {
    /// Needs `sudo` or an admin shell.
    Permission,
    /// `gpg` is not installed.
    GnupgMissing,
    /// `~/.gnupg` is owned by another user.
    GnupgOwnership,
    /// Anything else.
    Generic,
}

impl InstallFailure {
    /// Classify a nonzero exit.
    pub fn classify(exit_code: i32, output: &str) -> Self {
        if exit_code == 2 || output.contains(DPKG_SUPERUSER_ERROR) {
            InstallFailure::Permission
        } else if exit_code == 3 {
            InstallFailure::GnupgMissing
        } else if exit_code == 4 {
            InstallFailure::GnupgOwnership
        } else {
            InstallFailure::Generic
        }
    }

    /// The remediation message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            InstallFailure::Permission => {
                "Error: update failed due to improper permissions\nPlease re-run with `sudo` or as an admin"
            }
            InstallFailure::GnupgMissing => {
                "Error: Unable to find gpg binary for signature verification\nYou can resolve this error by installing your system's gnupg package"
            }
            InstallFailure::GnupgOwnership => {
                "Error: Unable to read ~/.gnupg directory\nYou can resolve this error by running 'sudo chown -R $(whoami) ~/.gnupg'"
            }
            InstallFailure::Generic => "Unable to install the latest Doppler CLI",
        }
    }
}
