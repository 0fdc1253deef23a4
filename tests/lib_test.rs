//! Library integration tests.

use std::cmp::Ordering;

use doppler::DopplerError;

#[test]
fn error_types_are_public() {
    let err = DopplerError::Execution {
        failure: doppler::updates::InstallFailure::GnupgMissing,
        exit_code: 3,
    };
    assert!(err.to_string().contains("gpg binary"));
    assert_eq!(
        err.detail().as_deref(),
        Some("install script exited with code 3")
    );
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> doppler::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use doppler::cli::{Cli, Commands};

    let cli = Cli::parse_from(["doppler", "changelog", "--number", "3", "--json"]);
    assert!(cli.json);

    if let Some(Commands::Changelog(args)) = cli.command {
        assert_eq!(args.number, 3);
    } else {
        panic!("Expected Changelog command");
    }
}

#[test]
fn version_comparison_is_public() {
    use doppler::updates::{compare_versions, SemanticVersion};

    assert_eq!(compare_versions("3.10.0", "3.9.9").unwrap(), Ordering::Greater);
    assert_eq!(compare_versions("3.7.1", "3.7.1").unwrap() as i8, 0);
    assert!(compare_versions("3.7", "3.7.1").is_err());
    assert_eq!(SemanticVersion::parse("1.2.3").unwrap().to_string(), "1.2.3");
}

#[test]
fn throttle_is_public() {
    use chrono::{Duration, Utc};
    use doppler::updates::{evaluate, CheckDecision, ThrottleInput};

    let now = Utc::now();
    let decision = evaluate(&ThrottleInput {
        command: "doppler secrets",
        development: false,
        checks_enabled: true,
        checked_at: now - Duration::hours(48),
        now,
    });
    assert_eq!(decision, CheckDecision::Proceed);
}

#[test]
fn config_file_round_trips_version_check() {
    use doppler::config::{ConfigFile, VersionCheckRecord, VersionCheckStore};

    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("nested").join(".doppler.yaml");

    let mut config = ConfigFile::load(&path).unwrap();
    config
        .set_version_check(VersionCheckRecord::now("3.7.1"))
        .unwrap();

    let reloaded = ConfigFile::load(&path).unwrap();
    assert_eq!(reloaded.version_check().latest_version, "3.7.1");
}

#[cfg(unix)]
#[test]
fn script_executor_is_public() {
    use doppler::updates::{parse_installed_version, Invocation, ScriptExecutor};

    let temp = tempfile::TempDir::new().unwrap();
    let executor = ScriptExecutor::new(Invocation::Direct, false).with_temp_dir(temp.path());
    let result = executor
        .execute(b"#!/bin/sh\necho \"Installed Doppler CLI v3.7.1\"\n")
        .unwrap();

    assert!(result.success());
    assert_eq!(
        parse_installed_version(&result.output).unwrap().to_string(),
        "3.7.1"
    );
}
