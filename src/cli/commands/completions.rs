//! Shell completions generation.
//!
//! The `doppler completion` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completion command implementation.
pub struct CompletionsCommand {
    args: CompletionArgs,
}

impl CompletionsCommand {
    /// Create a new completion command.
    pub fn new(args: CompletionArgs) -> Self {
        Self { args }
    }

    fn generate(&self, out: &mut dyn std::io::Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "doppler", out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&mut self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.generate(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
