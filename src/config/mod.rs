//! Configuration: runtime settings and the persisted user config file.
//!
//! - [`settings`] - Flags and environment resolved once per process
//! - [`file`] - The YAML user configuration file
//! - [`store`] - The version check record and its storage trait

pub mod file;
pub mod settings;
pub mod store;

pub use file::{ConfigFile, UserConfig};
pub use settings::{version_check_enabled_by_env, Settings, DEFAULT_TIMEOUT, VERSION_CHECK_ENV};
pub use store::{MemoryStore, VersionCheckRecord, VersionCheckStore};
