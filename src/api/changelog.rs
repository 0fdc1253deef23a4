//! Release notes.

use serde::{Deserialize, Serialize};

use crate::updates::version::SemanticVersion;

/// A release as returned by the releases API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Tag, e.g. `v3.7.1`.
    pub tag_name: String,
    /// Markdown release notes.
    #[serde(default)]
    pub body: Option<String>,
}

impl Release {
    /// The tag without its `v` prefix.
    pub fn version(&self) -> &str {
        self.tag_name.trim_start_matches('v')
    }
}

/// Changes shipped in one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNotes {
    pub version: String,
    pub changes: Vec<String>,
}

/// Release notes, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog {
    releases: Vec<ReleaseNotes>,
}

impl ChangeLog {
    /// Build a changelog from raw releases.
    ///
    /// Releases whose tag isn't a plain `major.minor.patch` are skipped.
    pub fn from_releases(releases: Vec<Release>) -> Self {
        let mut parsed: Vec<(SemanticVersion, ReleaseNotes)> = releases
            .into_iter()
            .filter_map(|release| {
                let version = SemanticVersion::parse(release.version()).ok()?;
                let changes = parse_changes(release.body.as_deref().unwrap_or(""));
                Some((
                    version,
                    ReleaseNotes {
                        version: version.to_string(),
                        changes,
                    },
                ))
            })
            .collect();

        parsed.sort_by(|a, b| b.0.cmp(&a.0));

        Self {
            releases: parsed.into_iter().map(|(_, notes)| notes).collect(),
        }
    }

    /// The `count` most recent releases.
    pub fn latest(&self, count: usize) -> &[ReleaseNotes] {
        &self.releases[..count.min(self.releases.len())]
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// Pull bullet points out of markdown release notes.
fn parse_changes(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
        })
        .map(|change| change.trim().to_string())
        .filter(|change| !change.is_empty())
        .collect()
}
