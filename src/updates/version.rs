//! Semantic versions and the running program version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Version of the running binary.
///
/// Release builds set `DOPPLER_CLI_VERSION` at compile time; everything else
/// reports the crate version.
pub const PROGRAM_VERSION: &str = match option_env!("DOPPLER_CLI_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Whether this binary is a development build.
///
/// Development builds never check for updates.
pub fn is_development() -> bool {
    option_env!("DOPPLER_CLI_VERSION").is_none() && cfg!(debug_assertions)
}

/// A version string that is not exactly `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid semantic version '{input}'")]
pub struct VersionParseError {
    input: String,
}

/// A `major.minor.patch` release version.
///
/// Pre-release and build metadata are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `\d+\.\d+\.\d+` string.
    ///
    /// Leading zeros (`01.2.3`) are rejected.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let err = || VersionParseError {
            input: input.to_string(),
        };

        let mut parts = input.split('.');
        let mut next = || -> Result<u64, VersionParseError> {
            let part = parts.next().ok_or_else(err)?;
            if part.is_empty()
                || !part.bytes().all(|b| b.is_ascii_digit())
                || (part.len() > 1 && part.starts_with('0'))
            {
                return Err(err());
            }
            part.parse().map_err(|_| err())
        };

        let major = next()?;
        let minor = next()?;
        let patch = next()?;

        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compare two version strings.
///
/// `Ordering as i8` gives the conventional -1/0/1.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionParseError> {
    let a = SemanticVersion::parse(a)?;
    let b = SemanticVersion::parse(b)?;
    Ok(a.cmp(&b))
}
