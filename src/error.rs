//! Error types for Doppler CLI operations.
//!
//! This module defines [`DopplerError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The `Display` output of every variant is a single line meant for users
//! - Technical detail lives in the source chain, see [`DopplerError::detail`]
//! - Routine update checks swallow errors; explicit `doppler update` surfaces them

use std::path::PathBuf;
use thiserror::Error;

use crate::updates::outcome::InstallFailure;
use crate::updates::version::VersionParseError;

/// Core error type for Doppler CLI operations.
#[derive(Debug, Error)]
pub enum DopplerError {
    /// Network or API failure while fetching release metadata, changelog, or install script.
    #[error("{message}")]
    Fetch {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The install script could not be written to a temporary file.
    #[error("Unable to save install script")]
    Persistence(#[source] std::io::Error),

    /// The install script exited with a nonzero status.
    #[error("{}", .failure.message())]
    Execution {
        failure: InstallFailure,
        exit_code: i32,
    },

    /// Script output or a version string could not be interpreted.
    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: Option<VersionParseError>,
    },

    /// Failed to parse the user configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DopplerError {
    /// Technical detail behind the user-facing message, if any.
    ///
    /// Only shown when running with `--debug`.
    pub fn detail(&self) -> Option<String> {
        if let DopplerError::Execution { exit_code, .. } = self {
            return Some(format!("install script exited with code {}", exit_code));
        }

        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            causes.push(cause.to_string());
            current = cause.source();
        }

        if causes.is_empty() {
            None
        } else {
            Some(causes.join(": "))
        }
    }
}

/// Result type alias for Doppler CLI operations.
pub type Result<T> = std::result::Result<T, DopplerError>;
