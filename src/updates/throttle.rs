//! Gating of remote version checks.

use chrono::{DateTime, Duration, Utc};

/// Minimum interval between two remote version checks.
pub const CHECK_INTERVAL_HOURS: i64 = 24;

/// Commands that never trigger a version check.
///
/// `run` and `secrets download` are common in production workflows, and
/// `update` performs its own check.
pub const DISABLED_COMMANDS: &[&str] = &[
    "doppler run",
    "doppler secrets download",
    "doppler update",
];

/// Everything the throttle looks at.
#[derive(Debug, Clone)]
pub struct ThrottleInput<'a> {
    /// Full command path, e.g. `doppler secrets download`.
    pub command: &'a str,
    /// Whether the binary is a development build.
    pub development: bool,
    /// Whether version checks are globally enabled.
    pub checks_enabled: bool,
    /// When the last check happened.
    pub checked_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Outcome of evaluating the throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDecision {
    /// Go ahead and query the latest version.
    Proceed,
    /// The command is on the deny list.
    SuppressedCommand,
    /// Checks are disabled or this is a development build.
    Disabled,
    /// The last check was less than a day ago.
    Throttled,
}

impl CheckDecision {
    pub fn should_check(&self) -> bool {
        matches!(self, CheckDecision::Proceed)
    }
}

/// Decide whether a version check should run.
///
/// Rules are evaluated in order and the first match wins.
pub fn evaluate(input: &ThrottleInput<'_>) -> CheckDecision {
    if DISABLED_COMMANDS.contains(&input.command) {
        tracing::debug!("Skipping CLI upgrade check due to disallowed command");
        return CheckDecision::SuppressedCommand;
    }

    if !input.checks_enabled || input.development {
        return CheckDecision::Disabled;
    }

    let next_check = input.checked_at + Duration::hours(CHECK_INTERVAL_HOURS);
    if input.now <= next_check {
        return CheckDecision::Throttled;
    }

    CheckDecision::Proceed
}
