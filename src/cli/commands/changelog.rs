//! `doppler changelog` command implementation.

use crate::api::UpdateSource;
use crate::cli::args::ChangelogArgs;
use crate::error::{DopplerError, Result};
use crate::ui::{render_changelog, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The changelog command implementation.
pub struct ChangelogCommand<'a> {
    args: ChangelogArgs,
    source: &'a dyn UpdateSource,
}

impl<'a> ChangelogCommand<'a> {
    pub fn new(args: ChangelogArgs, source: &'a dyn UpdateSource) -> Self {
        Self { args, source }
    }
}

impl Command for ChangelogCommand<'_> {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Fetching changelog...");
        let changelog = self.source.changelog();
        spinner.finish_and_clear();
        let changelog = changelog?;

        if ui.output_mode() == OutputMode::Json {
            let json = serde_json::to_string_pretty(changelog.latest(self.args.number))
                .map_err(|e| DopplerError::Other(e.into()))?;
            ui.message(&json);
        } else {
            render_changelog(ui, &changelog, self.args.number);
        }

        Ok(CommandResult::success())
    }
}
