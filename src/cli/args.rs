//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    version_check_enabled_by_env, ConfigFile, Settings, VERSION_CHECK_ENV,
};
use crate::updates::version::{is_development, PROGRAM_VERSION};

/// The official Doppler CLI.
#[derive(Debug, Parser)]
#[command(name = "doppler")]
#[command(long_about = None)]
#[command(version = PROGRAM_VERSION, disable_version_flag = true)]
pub struct Cli {
    /// Config file
    #[arg(long, global = true, value_name = "PATH")]
    pub configuration: Option<PathBuf>,

    /// Output json
    #[arg(long, global = true)]
    pub json: bool,

    /// Output additional information
    #[arg(long, global = true)]
    pub debug: bool,

    /// Max time to wait for a response (e.g. 500ms, 10s, 2m)
    #[arg(long, global = true, default_value = "10s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Disable http timeout
    #[arg(long, global = true)]
    pub no_timeout: bool,

    /// Don't verify the validity of TLS certificates on HTTP requests (not recommended)
    #[arg(long, global = true)]
    pub no_verify_tls: bool,

    /// Don't check for new CLI versions
    #[arg(long, global = true)]
    pub no_check_version: bool,

    /// Get the version of the Doppler CLI
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Update the Doppler CLI
    Update(UpdateArgs),

    /// View the CLI's changelog
    Changelog(ChangelogArgs),

    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

/// Arguments for `doppler update`.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Install the latest CLI regardless of whether there's an update available
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `doppler changelog`.
#[derive(Debug, Clone, Args)]
pub struct ChangelogArgs {
    /// Number of releases to display
    #[arg(short, long, default_value_t = 5)]
    pub number: usize,
}

impl Default for ChangelogArgs {
    fn default() -> Self {
        Self { number: 5 }
    }
}

/// Arguments for `doppler completion`.
#[derive(Debug, Clone, Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl Cli {
    /// Full command path, e.g. `doppler update`.
    pub fn command_path(&self) -> String {
        match &self.command {
            Some(Commands::Update(_)) => "doppler update".to_string(),
            Some(Commands::Changelog(_)) => "doppler changelog".to_string(),
            Some(Commands::Completion(_)) => "doppler completion".to_string(),
            None => "doppler".to_string(),
        }
    }

    /// Resolve runtime settings from flags and the environment.
    pub fn settings(&self) -> Settings {
        let env = std::env::var(VERSION_CHECK_ENV).ok();
        self.settings_with_env(env.as_deref())
    }

    fn settings_with_env(&self, version_check_env: Option<&str>) -> Settings {
        Settings {
            debug: self.debug,
            json: self.json,
            timeout: (!self.no_timeout).then_some(self.timeout),
            verify_tls: !self.no_verify_tls,
            perform_version_check: !self.no_check_version
                && version_check_enabled_by_env(version_check_env),
            development: is_development(),
            config_path: self
                .configuration
                .clone()
                .unwrap_or_else(ConfigFile::default_path),
        }
    }
}

/// Parse a duration like `500ms`, `10s`, `2m`, `1h`, or bare seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{}'", input))?;

    let seconds = |multiplier: u64| {
        value
            .checked_mul(multiplier)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("invalid duration '{}' (too large)", input))
    };

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        "m" => seconds(60),
        "h" => seconds(3600),
        _ => Err(format!(
            "invalid duration '{}' (expected a unit of ms, s, m, or h)",
            input
        )),
    }
}
