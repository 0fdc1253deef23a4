//! User configuration file.
//!
//! The file is shared with other parts of the CLI (scoped tokens, enclave
//! settings, ...). Only the `version-check` section is interpreted here;
//! every other top-level key is carried through untouched on save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DopplerError, Result};

use super::store::{VersionCheckRecord, VersionCheckStore};

/// Contents of `~/.doppler/.doppler.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Last update check.
    #[serde(default, rename = "version-check")]
    pub version_check: VersionCheckRecord,

    /// Sections owned by other commands.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

/// A loaded configuration file bound to its path.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    config: UserConfig,
}

impl ConfigFile {
    /// Get the default configuration path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".doppler")
            .join(".doppler.yaml")
    }

    /// Load the configuration, or start empty if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self {
                path: path.to_path_buf(),
                config: UserConfig::default(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config = if content.trim().is_empty() {
            UserConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| DopplerError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Get the parsed configuration.
    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Save the configuration using atomic write.
    ///
    /// Uses the write-to-temp-then-rename pattern to prevent corruption.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self.config).map_err(|e| {
            DopplerError::Other(anyhow::anyhow!("Failed to serialize config: {}", e))
        })?;

        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl VersionCheckStore for ConfigFile {
    fn version_check(&self) -> VersionCheckRecord {
        self.config.version_check.clone()
    }

    fn set_version_check(&mut self, record: VersionCheckRecord) -> Result<()> {
        self.config.version_check = record;
        self.save()
    }
}
