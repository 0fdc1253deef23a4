//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use clap::CommandFactory;

use crate::api::UpdateSource;
use crate::cli::args::{Cli, Commands};
use crate::config::{Settings, VersionCheckStore};
use crate::error::Result;
use crate::telemetry::Telemetry;
use crate::ui::UserInterface;
use crate::updates::{CheckResult, UpdateController};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Every command is preceded by a background version check.
pub struct CommandDispatcher<'a> {
    settings: &'a Settings,
    source: &'a dyn UpdateSource,
    store: &'a mut dyn VersionCheckStore,
    telemetry: &'a dyn Telemetry,
}

impl<'a> CommandDispatcher<'a> {
    pub fn new(
        settings: &'a Settings,
        source: &'a dyn UpdateSource,
        store: &'a mut dyn VersionCheckStore,
        telemetry: &'a dyn Telemetry,
    ) -> Self {
        Self {
            settings,
            source,
            store,
            telemetry,
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&mut self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.settings.json {
            self.check_for_update(&cli.command_path(), ui)?;
        }

        match &cli.command {
            Some(Commands::Update(args)) => {
                let mut cmd = super::update::UpdateCommand::new(
                    args.clone(),
                    self.settings,
                    self.source,
                    &mut *self.store,
                    self.telemetry,
                );
                cmd.execute(ui)
            }
            Some(Commands::Changelog(args)) => {
                let mut cmd = super::changelog::ChangelogCommand::new(args.clone(), self.source);
                cmd.execute(ui)
            }
            Some(Commands::Completion(args)) => {
                let mut cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                ui.message(&Cli::command().render_help().to_string());
                Ok(CommandResult::success())
            }
        }
    }

    /// Run the throttled check and act on an available update.
    ///
    /// Interactive sessions are offered the install; others get a notice.
    /// Only an accepted install that fails is an error.
    fn check_for_update(&mut self, command: &str, ui: &mut dyn UserInterface) -> Result<()> {
        let mut controller = UpdateController::new(
            self.settings,
            self.source,
            &mut *self.store,
            self.telemetry,
        );

        let CheckResult::Available(latest) = controller.check_update(ui, command) else {
            return Ok(());
        };

        if ui.is_interactive() {
            controller.prompt_to_update(ui, latest)?;
        } else {
            controller.notify_available(ui, latest);
        }

        Ok(())
    }
}
