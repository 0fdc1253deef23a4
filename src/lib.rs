//! Doppler CLI - self-update core.
//!
//! The Doppler CLI keeps itself up to date: it periodically checks for a
//! newer release, offers to install it, and installs it by running the
//! official install script.
//!
//! # Modules
//!
//! - [`api`] - Release metadata, changelog, and install script retrieval
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Runtime settings and the persisted user configuration
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Platform detection
//! - [`telemetry`] - Fire-and-forget usage events
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`updates`] - Version checks, install script execution, and outcomes
//!
//! # Example
//!
//! ```
//! use doppler::updates::{compare_versions, parse_installed_version};
//! use std::cmp::Ordering;
//!
//! let installed = parse_installed_version("Installed Doppler CLI v3.7.1").unwrap();
//! assert_eq!(installed.to_string(), "3.7.1");
//! assert_eq!(compare_versions("3.7.0", "3.7.1").unwrap(), Ordering::Less);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod telemetry;
pub mod ui;
pub mod updates;

pub use error::{DopplerError, Result};
