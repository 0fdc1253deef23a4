//! Changelog rendering.

use crate::api::ChangeLog;

use super::UserInterface;

/// Print the `max` most recent releases.
///
/// Each release is its `v`-prefixed version followed by one bullet per
/// change; releases are separated by a blank line.
pub fn render_changelog(ui: &mut dyn UserInterface, changelog: &ChangeLog, max: usize) {
    for (i, release) in changelog.latest(max).iter().enumerate() {
        if i > 0 {
            ui.message("");
        }
        ui.message(&format!("v{}", release.version));
        for change in &release.changes {
            ui.message(&format!("* {}", change));
        }
    }
}
