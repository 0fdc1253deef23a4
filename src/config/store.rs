//! Version check record persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The last known latest version and when it was checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionCheckRecord {
    /// Latest release seen, as `major.minor.patch`.
    #[serde(default)]
    pub latest_version: String,

    /// When the check was performed.
    #[serde(default = "never")]
    pub checked_at: DateTime<Utc>,
}

fn never() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl VersionCheckRecord {
    /// Create a record checked right now.
    pub fn now(latest_version: impl Into<String>) -> Self {
        Self {
            latest_version: latest_version.into(),
            checked_at: Utc::now(),
        }
    }
}

impl Default for VersionCheckRecord {
    fn default() -> Self {
        Self {
            latest_version: String::new(),
            checked_at: never(),
        }
    }
}

/// Where the version check record lives.
pub trait VersionCheckStore {
    /// Get the stored record, or a never-checked default.
    fn version_check(&self) -> VersionCheckRecord;

    /// Replace the stored record.
    fn set_version_check(&mut self, record: VersionCheckRecord) -> Result<()>;
}

/// In-memory store, for tests and for running without a config file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: VersionCheckRecord,
    writes: usize,
}

impl MemoryStore {
    pub fn new(record: VersionCheckRecord) -> Self {
        Self { record, writes: 0 }
    }

    /// Number of times the record was written.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl VersionCheckStore for MemoryStore {
    fn version_check(&self) -> VersionCheckRecord {
        self.record.clone()
    }

    fn set_version_check(&mut self, record: VersionCheckRecord) -> Result<()> {
        self.record = record;
        self.writes += 1;
        Ok(())
    }
}
