//! Update checking and self-updating functionality.
//!
//! This module provides:
//! - Semantic version parsing and comparison
//! - Throttling of background version checks
//! - Install script execution and output interpretation
//! - The [`UpdateController`] that drives check, prompt, and install

pub mod controller;
pub mod outcome;
pub mod script;
pub mod throttle;
pub mod version;

pub use controller::{CheckResult, UpdateController, UpdateOutcome, UPDATE_PROMPT_KEY};
pub use outcome::{parse_installed_version, InstallFailure};
pub use script::{ExecutionResult, Invocation, ScriptExecutor};
pub use throttle::{evaluate, CheckDecision, ThrottleInput};
pub use version::{compare_versions, SemanticVersion, VersionParseError, PROGRAM_VERSION};
