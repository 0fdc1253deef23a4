//! `doppler update` command implementation.

use crate::api::UpdateSource;
use crate::cli::args::UpdateArgs;
use crate::config::{Settings, VersionCheckStore};
use crate::error::Result;
use crate::telemetry::Telemetry;
use crate::ui::UserInterface;
use crate::updates::UpdateController;

use super::dispatcher::{Command, CommandResult};

/// The update command implementation.
pub struct UpdateCommand<'a> {
    args: UpdateArgs,
    settings: &'a Settings,
    source: &'a dyn UpdateSource,
    store: &'a mut dyn VersionCheckStore,
    telemetry: &'a dyn Telemetry,
}

impl<'a> UpdateCommand<'a> {
    pub fn new(
        args: UpdateArgs,
        settings: &'a Settings,
        source: &'a dyn UpdateSource,
        store: &'a mut dyn VersionCheckStore,
        telemetry: &'a dyn Telemetry,
    ) -> Self {
        Self {
            args,
            settings,
            source,
            store,
            telemetry,
        }
    }
}

impl Command for UpdateCommand<'_> {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut controller =
            UpdateController::new(self.settings, self.source, &mut *self.store, self.telemetry);

        let outcome = controller.update(ui, self.args.force)?;
        tracing::debug!(
            updated = outcome.was_updated,
            version = %outcome.installed_version,
            "Update finished"
        );

        Ok(CommandResult::success())
    }
}
