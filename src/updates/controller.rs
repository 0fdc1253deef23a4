//! The self-update flow.
//!
//! [`UpdateController`] ties the pieces together: it asks the throttle
//! whether to check, queries the [`UpdateSource`] for the latest release,
//! prompts, runs the install script, interprets its output, and records
//! the result in the [`VersionCheckStore`].

use std::time::Instant;

use chrono::Utc;

use crate::api::UpdateSource;
use crate::config::{Settings, VersionCheckRecord, VersionCheckStore};
use crate::error::{DopplerError, Result};
use crate::shell::Platform;
use crate::telemetry::{Telemetry, TelemetryEvent};
use crate::ui::{render_changelog, Prompt, UserInterface};

use super::outcome::{parse_installed_version, InstallFailure};
use super::script::{Invocation, ScriptExecutor};
use super::throttle::{self, CheckDecision, ThrottleInput};
use super::version::{SemanticVersion, PROGRAM_VERSION};

/// Key of the "install the update?" prompt (`DOPPLER_PROMPT_INSTALL_UPDATE`).
pub const UPDATE_PROMPT_KEY: &str = "install_update";

const ALREADY_LATEST: &str = "You are already running the latest version";

/// Result of a background version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The throttle decided not to check.
    Suppressed(CheckDecision),
    /// The latest version couldn't be determined.
    CheckFailed,
    /// Nothing newer than the running version.
    UpToDate,
    /// A newer version exists but must be installed by the package manager.
    ManualInstall(VersionCheckRecord),
    /// A newer version exists and can be installed in place.
    Available(VersionCheckRecord),
}

impl CheckResult {
    /// Whether the caller should offer to install an update.
    pub fn is_available(&self) -> bool {
        matches!(self, CheckResult::Available(_))
    }
}

/// What an install run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Whether the installed version is newer than the one running.
    pub was_updated: bool,
    /// Version reported by the install script.
    pub installed_version: String,
}

/// Drives version checks and installs.
pub struct UpdateController<'a> {
    settings: &'a Settings,
    source: &'a dyn UpdateSource,
    store: &'a mut dyn VersionCheckStore,
    telemetry: &'a dyn Telemetry,
    executor: ScriptExecutor,
    platform: Platform,
    current_version: String,
}

impl<'a> UpdateController<'a> {
    /// Create a controller for the running binary on the current platform.
    pub fn new(
        settings: &'a Settings,
        source: &'a dyn UpdateSource,
        store: &'a mut dyn VersionCheckStore,
        telemetry: &'a dyn Telemetry,
    ) -> Self {
        let platform = Platform::current();
        Self {
            settings,
            source,
            store,
            telemetry,
            executor: ScriptExecutor::new(Invocation::for_platform(platform), settings.debug),
            platform,
            current_version: PROGRAM_VERSION.to_string(),
        }
    }

    /// Override the detected platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the script executor.
    pub fn with_executor(mut self, executor: ScriptExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Override the version considered to be running.
    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    /// Check, subject to throttling, whether a newer version is available.
    ///
    /// Never fails: any problem along the way yields `CheckFailed`.
    pub fn check_update(&mut self, ui: &mut dyn UserInterface, command: &str) -> CheckResult {
        let previous = self.store.version_check();
        let now = Utc::now();

        let decision = throttle::evaluate(&ThrottleInput {
            command,
            development: self.settings.development,
            checks_enabled: self.settings.perform_version_check,
            checked_at: previous.checked_at,
            now,
        });
        if !decision.should_check() {
            return CheckResult::Suppressed(decision);
        }

        self.capture(TelemetryEvent::new("VersionCheck"));

        let latest = match self.newer_version() {
            Ok(latest) => latest,
            Err(e) => {
                tracing::debug!("Unable to check for CLI updates: {}", e);
                if let Some(detail) = e.detail() {
                    tracing::debug!("{}", detail);
                }
                return CheckResult::CheckFailed;
            }
        };

        let Some(latest) = latest else {
            tracing::debug!("No CLI updates available");
            self.persist(VersionCheckRecord {
                checked_at: now,
                ..previous
            });
            return CheckResult::UpToDate;
        };

        let record = VersionCheckRecord {
            latest_version: latest.to_string(),
            checked_at: now,
        };

        if !self.platform.supports_self_install() {
            ui.warning(&format!(
                "Update: Doppler CLI {} is available\n\nYou can update via 'scoop update doppler'\n",
                record.latest_version
            ));
            self.persist(record.clone());
            return CheckResult::ManualInstall(record);
        }

        self.capture(TelemetryEvent::new("UpgradeAvailable"));
        CheckResult::Available(record)
    }

    /// Offer to install `latest`.
    ///
    /// Returns `None` when the user declines; the record is then persisted
    /// so the offer isn't repeated until the next check is due.
    pub fn prompt_to_update(
        &mut self,
        ui: &mut dyn UserInterface,
        latest: VersionCheckRecord,
    ) -> Result<Option<UpdateOutcome>> {
        ui.success("An update is available.");

        if let Ok(changelog) = self.source.changelog() {
            render_changelog(ui, &changelog, 1);
            ui.message("");
        }

        let prompt = Prompt::new(
            UPDATE_PROMPT_KEY,
            format!("Install Doppler CLI {}", latest.latest_version),
            true,
        );
        if ui.confirm(&prompt)? {
            self.capture(TelemetryEvent::new("UpgradeFromPrompt"));
            return self.install_update(ui).map(Some);
        }

        self.persist(latest);
        Ok(None)
    }

    /// Tell a non-interactive session about `latest` without prompting.
    ///
    /// The record is persisted so the notice repeats at most once per
    /// check interval.
    pub fn notify_available(&mut self, ui: &mut dyn UserInterface, latest: VersionCheckRecord) {
        ui.warning(&format!(
            "Doppler CLI {} is available; run 'doppler update' to install it",
            latest.latest_version
        ));
        self.persist(latest);
    }

    /// Explicit `doppler update`.
    ///
    /// Unless `force` is set, the install is skipped when nothing newer
    /// than the running version has been released. The throttle does not
    /// apply here. A running version that doesn't parse never blocks the
    /// install.
    pub fn update(&mut self, ui: &mut dyn UserInterface, force: bool) -> Result<UpdateOutcome> {
        if !force {
            match self.running_version() {
                Ok(current) => {
                    let latest = self.fetch_latest()?;
                    if latest <= current {
                        ui.message(ALREADY_LATEST);
                        self.persist(VersionCheckRecord::now(latest.to_string()));
                        return Ok(UpdateOutcome {
                            was_updated: false,
                            installed_version: self.current_version.clone(),
                        });
                    }
                }
                Err(e) => {
                    tracing::debug!("{}; installing without a version check", e);
                }
            }
        }

        self.install_update(ui)
    }

    /// Install the latest version and report the result.
    pub fn install_update(&mut self, ui: &mut dyn UserInterface) -> Result<UpdateOutcome> {
        ui.message("Updating...");
        let outcome = self.run_install_script()?;

        if outcome.was_updated {
            ui.message(&format!("Installed CLI {}", outcome.installed_version));

            if let Ok(changelog) = self.source.changelog() {
                ui.message("\nWhat's new:");
                render_changelog(ui, &changelog, 1);
                ui.message("\nTip: run 'doppler changelog' to see all latest changes");
            }

            ui.message("");
        } else {
            ui.message(ALREADY_LATEST);
        }

        self.persist(VersionCheckRecord::now(outcome.installed_version.clone()));
        Ok(outcome)
    }

    /// Download and execute the install script.
    pub fn run_install_script(&self) -> Result<UpdateOutcome> {
        let started = Instant::now();
        let script = self.source.install_script()?;
        let fetch_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.capture(TelemetryEvent::new("InstallScriptDownloaded").with("durationMs", fetch_ms));

        let result = self.executor.execute(&script)?;

        if !result.success() {
            self.capture(
                TelemetryEvent::new("InstallScriptFailed")
                    .with("durationMs", result.duration_ms())
                    .with("exitCode", i64::from(result.exit_code)),
            );
            return Err(DopplerError::Execution {
                failure: InstallFailure::classify(result.exit_code, &result.output),
                exit_code: result.exit_code,
            });
        }

        self.capture(
            TelemetryEvent::new("InstallScriptCompleted").with("durationMs", result.duration_ms()),
        );

        let installed = parse_installed_version(&result.output)?;

        let was_updated = match SemanticVersion::parse(&self.current_version) {
            Ok(current) => installed > current,
            Err(e) => {
                tracing::debug!("Unable to parse current CLI version");
                tracing::debug!("{}", e);
                true
            }
        };

        Ok(UpdateOutcome {
            was_updated,
            installed_version: installed.to_string(),
        })
    }

    /// The latest release, if it's newer than the running version.
    fn newer_version(&self) -> Result<Option<SemanticVersion>> {
        let latest = self.fetch_latest()?;
        let current = self.running_version()?;
        Ok((latest > current).then_some(latest))
    }

    fn fetch_latest(&self) -> Result<SemanticVersion> {
        let latest = self.source.latest_version()?;
        SemanticVersion::parse(&latest).map_err(|e| DopplerError::Parse {
            message: "Unable to parse latest CLI version".to_string(),
            source: Some(e),
        })
    }

    fn running_version(&self) -> Result<SemanticVersion> {
        SemanticVersion::parse(&self.current_version).map_err(|e| DopplerError::Parse {
            message: "Unable to parse current CLI version".to_string(),
            source: Some(e),
        })
    }

    /// Save the record; a failure only costs an extra check later.
    fn persist(&mut self, record: VersionCheckRecord) {
        if let Err(e) = self.store.set_version_check(record) {
            tracing::warn!("Unable to save version check: {}", e);
        }
    }

    fn capture(&self, event: TelemetryEvent) {
        self.telemetry.capture(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChangeLog, Release};
    use crate::config::MemoryStore;
    use crate::telemetry::RecordingTelemetry;
    use crate::ui::MockUI;
    use anyhow::anyhow;
    use chrono::Duration;
    use tempfile::TempDir;

    struct FakeSource {
        latest: Option<String>,
        script: Option<String>,
        releases: Option<Vec<(&'static str, &'static str)>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                latest: Some("2.5.0".to_string()),
                script: Some(script_printing("2.5.0", 0)),
                releases: Some(vec![("v2.5.0", "- Faster startup")]),
            }
        }

        fn latest(mut self, version: Option<&str>) -> Self {
            self.latest = version.map(String::from);
            self
        }

        fn script(mut self, script: Option<String>) -> Self {
            self.script = script;
            self
        }

        fn no_changelog(mut self) -> Self {
            self.releases = None;
            self
        }
    }

    fn unavailable(message: &str) -> DopplerError {
        DopplerError::Fetch {
            message: message.to_string(),
            source: anyhow!("connection refused"),
        }
    }

    impl UpdateSource for FakeSource {
        fn latest_version(&self) -> Result<String> {
            self.latest
                .clone()
                .ok_or_else(|| unavailable("Unable to fetch latest CLI version"))
        }

        fn install_script(&self) -> Result<Vec<u8>> {
            self.script
                .as_ref()
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| unavailable("Unable to download CLI install script"))
        }

        fn changelog(&self) -> Result<ChangeLog> {
            let releases = self
                .releases
                .as_ref()
                .ok_or_else(|| unavailable("Unable to fetch CLI changelog"))?;
            Ok(ChangeLog::from_releases(
                releases
                    .iter()
                    .map(|(tag, body)| Release {
                        tag_name: tag.to_string(),
                        body: Some(body.to_string()),
                    })
                    .collect(),
            ))
        }
    }

    fn script_printing(version: &str, exit_code: i32) -> String {
        format!(
            "#!/bin/sh\necho 'Downloading'\necho 'Installed Doppler CLI v{}'\nexit {}\n",
            version, exit_code
        )
    }

    fn failing_script(exit_code: i32, output: &str) -> String {
        format!("#!/bin/sh\necho '{}'\nexit {}\n", output, exit_code)
    }

    fn settings() -> Settings {
        Settings::default()
    }

    fn stale_store() -> MemoryStore {
        MemoryStore::new(VersionCheckRecord {
            latest_version: "2.4.0".to_string(),
            checked_at: Utc::now() - Duration::hours(25),
        })
    }

    struct Harness {
        settings: Settings,
        source: FakeSource,
        store: MemoryStore,
        telemetry: RecordingTelemetry,
        temp: TempDir,
    }

    impl Harness {
        fn new(source: FakeSource) -> Self {
            Self {
                settings: settings(),
                source,
                store: stale_store(),
                telemetry: RecordingTelemetry::new(),
                temp: TempDir::new().unwrap(),
            }
        }

        fn controller(&mut self, current: &str) -> UpdateController<'_> {
            let executor = ScriptExecutor::new(
                Invocation::Shell {
                    interpreter: "sh".to_string(),
                },
                false,
            )
            .with_temp_dir(self.temp.path());

            UpdateController::new(
                &self.settings,
                &self.source,
                &mut self.store,
                &self.telemetry,
            )
            .with_platform(Platform::Unix)
            .with_executor(executor)
            .with_current_version(current)
        }

        fn temp_is_empty(&self) -> bool {
            std::fs::read_dir(self.temp.path()).unwrap().next().is_none()
        }
    }

    // --- check_update ---

    #[test]
    fn check_suppressed_for_denylisted_command() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler run");

        assert_eq!(result, CheckResult::Suppressed(CheckDecision::SuppressedCommand));
        assert!(h.telemetry.events().is_empty());
        assert_eq!(h.store.writes(), 0);
    }

    #[test]
    fn check_suppressed_when_disabled() {
        let mut h = Harness::new(FakeSource::new());
        h.settings.perform_version_check = false;
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert_eq!(result, CheckResult::Suppressed(CheckDecision::Disabled));
    }

    #[test]
    fn check_throttled_within_a_day() {
        let mut h = Harness::new(FakeSource::new());
        h.store = MemoryStore::new(VersionCheckRecord::now("2.4.0"));
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert_eq!(result, CheckResult::Suppressed(CheckDecision::Throttled));
        assert!(!result.is_available());
    }

    #[test]
    fn check_failed_on_fetch_error_persists_nothing() {
        let mut h = Harness::new(FakeSource::new().latest(None));
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert_eq!(result, CheckResult::CheckFailed);
        assert_eq!(h.store.writes(), 0);
        assert_eq!(h.telemetry.names(), vec!["VersionCheck"]);
    }

    #[test]
    fn check_failed_on_unparsable_latest() {
        let mut h = Harness::new(FakeSource::new().latest(Some("latest")));
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert_eq!(result, CheckResult::CheckFailed);
        assert_eq!(h.store.writes(), 0);
    }

    #[test]
    fn check_up_to_date_refreshes_checked_at_only() {
        let mut h = Harness::new(FakeSource::new().latest(Some("2.4.0")));
        let before = h.store.version_check();
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert_eq!(result, CheckResult::UpToDate);
        let after = h.store.version_check();
        assert_eq!(after.latest_version, before.latest_version);
        assert!(after.checked_at > before.checked_at);
        assert_eq!(h.store.writes(), 1);
    }

    #[test]
    fn check_on_windows_prints_manual_instructions() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let result = h
            .controller("2.4.0")
            .with_platform(Platform::Windows)
            .check_update(&mut ui, "doppler secrets");

        let CheckResult::ManualInstall(record) = result else {
            panic!("expected ManualInstall, got {:?}", result);
        };
        assert_eq!(record.latest_version, "2.5.0");
        assert!(ui.has_warning("Update: Doppler CLI 2.5.0 is available"));
        assert!(ui.has_warning("scoop update doppler"));
        assert_eq!(h.store.version_check().latest_version, "2.5.0");
        assert!(!h.telemetry.names().contains(&"UpgradeAvailable".to_string()));
    }

    #[test]
    fn check_available_returns_record_without_persisting() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let result = h.controller("2.4.0").check_update(&mut ui, "doppler secrets");

        assert!(result.is_available());
        let CheckResult::Available(record) = result else {
            unreachable!()
        };
        assert_eq!(record.latest_version, "2.5.0");
        assert_eq!(h.store.writes(), 0);
        assert_eq!(h.telemetry.names(), vec!["VersionCheck", "UpgradeAvailable"]);
    }

    // --- run_install_script ---

    #[cfg(unix)]
    #[test]
    fn install_newer_version_is_an_update() {
        let mut h = Harness::new(FakeSource::new());
        let outcome = h.controller("2.4.0").run_install_script().unwrap();

        assert!(outcome.was_updated);
        assert_eq!(outcome.installed_version, "2.5.0");
        assert!(h.temp_is_empty());
        assert_eq!(
            h.telemetry.names(),
            vec!["InstallScriptDownloaded", "InstallScriptCompleted"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn install_same_version_is_not_an_update() {
        let mut h = Harness::new(FakeSource::new());
        let outcome = h.controller("2.5.0").run_install_script().unwrap();

        assert!(!outcome.was_updated);
        assert_eq!(outcome.installed_version, "2.5.0");
    }

    #[cfg(unix)]
    #[test]
    fn install_with_unparsable_running_version_counts_as_update() {
        let mut h = Harness::new(FakeSource::new());
        let outcome = h.controller("dev").run_install_script().unwrap();

        assert!(outcome.was_updated);
    }

    #[cfg(unix)]
    #[test]
    fn install_failure_exit_codes_are_classified() {
        let cases = [
            (2, "boom", InstallFailure::Permission),
            (3, "boom", InstallFailure::GnupgMissing),
            (4, "boom", InstallFailure::GnupgOwnership),
            (1, "boom", InstallFailure::Generic),
            (
                1,
                "dpkg: error: requested operation requires superuser privilege",
                InstallFailure::Permission,
            ),
        ];

        for (code, output, expected) in cases {
            let mut h =
                Harness::new(FakeSource::new().script(Some(failing_script(code, output))));
            let err = h.controller("2.4.0").run_install_script().unwrap_err();

            match err {
                DopplerError::Execution { failure, exit_code } => {
                    assert_eq!(failure, expected, "exit code {}", code);
                    assert_eq!(exit_code, code);
                }
                other => panic!("expected Execution error, got {:?}", other),
            }

            let failed = h.telemetry.find("InstallScriptFailed").unwrap();
            assert_eq!(failed.properties["exitCode"], i64::from(code));
            assert!(failed.properties.contains_key("durationMs"));
            assert!(h.telemetry.find("InstallScriptCompleted").is_none());
            assert!(h.temp_is_empty());
        }
    }

    #[test]
    fn install_script_fetch_failure_propagates() {
        let mut h = Harness::new(FakeSource::new().script(None));
        let err = h.controller("2.4.0").run_install_script().unwrap_err();

        assert!(matches!(err, DopplerError::Fetch { .. }));
        assert_eq!(err.to_string(), "Unable to download CLI install script");
        assert!(h.telemetry.events().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn install_without_version_line_is_parse_error() {
        let script = "#!/bin/sh\necho 'all done'\n".to_string();
        let mut h = Harness::new(FakeSource::new().script(Some(script)));
        let err = h.controller("2.4.0").run_install_script().unwrap_err();

        assert!(matches!(err, DopplerError::Parse { .. }));
        assert_eq!(err.to_string(), "Unable to determine new CLI version");
    }

    // --- install_update ---

    #[cfg(unix)]
    #[test]
    fn install_update_prints_changelog_and_persists() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let outcome = h.controller("2.4.0").install_update(&mut ui).unwrap();

        assert!(outcome.was_updated);
        assert_eq!(ui.messages()[0], "Updating...");
        assert!(ui.has_message("Installed CLI 2.5.0"));
        assert!(ui.has_message("What's new:"));
        assert!(ui.has_message("* Faster startup"));
        assert!(ui.has_message("doppler changelog"));
        assert_eq!(h.store.version_check().latest_version, "2.5.0");
    }

    #[cfg(unix)]
    #[test]
    fn install_update_without_changelog_still_succeeds() {
        let mut h = Harness::new(FakeSource::new().no_changelog());
        let mut ui = MockUI::new();
        h.controller("2.4.0").install_update(&mut ui).unwrap();

        assert!(ui.has_message("Installed CLI 2.5.0"));
        assert!(!ui.has_message("What's new:"));
    }

    #[cfg(unix)]
    #[test]
    fn install_update_same_version_persists_anyway() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let outcome = h.controller("2.5.0").install_update(&mut ui).unwrap();

        assert!(!outcome.was_updated);
        assert!(ui.has_message(ALREADY_LATEST));
        assert_eq!(h.store.writes(), 1);
        assert_eq!(h.store.version_check().latest_version, "2.5.0");
    }

    #[cfg(unix)]
    #[test]
    fn install_update_error_persists_nothing() {
        let mut h = Harness::new(FakeSource::new().script(Some(failing_script(2, "denied"))));
        let mut ui = MockUI::new();
        let err = h.controller("2.4.0").install_update(&mut ui).unwrap_err();

        assert!(err.to_string().contains("improper permissions"));
        assert_eq!(h.store.writes(), 0);
    }

    // --- prompt_to_update ---

    #[cfg(unix)]
    #[test]
    fn prompt_accepted_installs() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        ui.set_prompt_response(UPDATE_PROMPT_KEY, "yes");

        let outcome = h
            .controller("2.4.0")
            .prompt_to_update(&mut ui, VersionCheckRecord::now("2.5.0"))
            .unwrap()
            .unwrap();

        assert!(outcome.was_updated);
        assert!(ui.has_success("An update is available."));
        assert_eq!(ui.prompts_shown(), [UPDATE_PROMPT_KEY]);
        assert_eq!(h.telemetry.names()[0], "UpgradeFromPrompt");
    }

    #[test]
    fn prompt_declined_persists_latest() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        ui.set_prompt_response(UPDATE_PROMPT_KEY, "no");

        let record = VersionCheckRecord::now("2.5.0");
        let outcome = h
            .controller("2.4.0")
            .prompt_to_update(&mut ui, record.clone())
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(h.store.version_check(), record);
        assert!(ui.has_message("v2.5.0"));
        assert!(h.telemetry.events().is_empty());
    }

    #[test]
    fn prompt_tolerates_missing_changelog() {
        let mut h = Harness::new(FakeSource::new().no_changelog());
        let mut ui = MockUI::new();
        ui.set_prompt_response(UPDATE_PROMPT_KEY, "no");

        h.controller("2.4.0")
            .prompt_to_update(&mut ui, VersionCheckRecord::now("2.5.0"))
            .unwrap();

        assert!(ui.messages().is_empty());
    }

    #[test]
    fn notify_available_warns_and_persists() {
        let mut h = Harness::new(FakeSource::new());
        let mut ui = MockUI::new();
        let record = VersionCheckRecord::now("2.5.0");
        h.controller("2.4.0").notify_available(&mut ui, record.clone());

        assert!(ui.has_warning("Doppler CLI 2.5.0 is available"));
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(h.store.version_check(), record);
    }

    // --- update ---

    #[test]
    fn update_skips_install_when_current() {
        let mut h = Harness::new(FakeSource::new().latest(Some("2.5.0")));
        let mut ui = MockUI::new();
        let outcome = h.controller("2.5.0").update(&mut ui, false).unwrap();

        assert!(!outcome.was_updated);
        assert!(ui.has_message(ALREADY_LATEST));
        assert!(!ui.has_message("Updating..."));
        assert_eq!(h.store.writes(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn update_with_unparsable_running_version_installs() {
        let mut h = Harness::new(FakeSource::new().latest(Some("2.5.0")));
        let mut ui = MockUI::new();
        let outcome = h.controller("dev").update(&mut ui, false).unwrap();

        assert!(outcome.was_updated);
        assert_eq!(outcome.installed_version, "2.5.0");
        assert!(ui.has_message("Updating..."));
        assert!(!ui.has_message(ALREADY_LATEST));
        assert_eq!(h.store.version_check().latest_version, "2.5.0");
    }

    #[test]
    fn update_surfaces_check_failure() {
        let mut h = Harness::new(FakeSource::new().latest(None));
        let mut ui = MockUI::new();
        let err = h.controller("2.4.0").update(&mut ui, false).unwrap_err();

        assert_eq!(err.to_string(), "Unable to fetch latest CLI version");
    }

    #[cfg(unix)]
    #[test]
    fn update_force_ignores_latest() {
        let mut h = Harness::new(FakeSource::new().latest(None));
        let mut ui = MockUI::new();
        let outcome = h.controller("2.5.0").update(&mut ui, true).unwrap();

        assert!(!outcome.was_updated);
        assert!(ui.has_message("Updating..."));
    }
}
