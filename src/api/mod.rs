//! Remote release information.
//!
//! The updater only needs three things from the network: the latest
//! released version, the install script, and the release notes.
//! [`UpdateSource`] abstracts them so the update flow can be tested
//! without a server.

pub mod changelog;
pub mod client;

pub use changelog::{ChangeLog, Release, ReleaseNotes};
pub use client::{ApiClient, CLI_HOST, RELEASES_API};

use crate::error::Result;

/// Provider of release metadata and the install script.
pub trait UpdateSource {
    /// Latest released version, as `major.minor.patch`.
    fn latest_version(&self) -> Result<String>;

    /// Body of the install script.
    fn install_script(&self) -> Result<Vec<u8>>;

    /// Release notes, newest first.
    fn changelog(&self) -> Result<ChangeLog>;
}
