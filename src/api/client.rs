//! HTTP client for release metadata and the install script.

use anyhow::anyhow;
use reqwest::blocking::{Client, Response};

use crate::config::Settings;
use crate::error::{DopplerError, Result};
use crate::updates::version::PROGRAM_VERSION;

use super::changelog::{ChangeLog, Release};
use super::UpdateSource;

/// Releases API for the CLI repository.
pub const RELEASES_API: &str = "https://api.github.com/repos/DopplerHQ/cli";

/// Host serving the install script.
pub const CLI_HOST: &str = "https://cli.doppler.com";

/// Fetches release information over HTTPS.
pub struct ApiClient {
    client: Client,
    releases_api: String,
    cli_host: String,
}

impl ApiClient {
    /// Create a client honoring the timeout and TLS settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("doppler-cli/{}", PROGRAM_VERSION))
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|e| DopplerError::Other(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            releases_api: RELEASES_API.to_string(),
            cli_host: CLI_HOST.to_string(),
        })
    }

    /// Point the client at different hosts.
    pub fn with_base_urls(mut self, releases_api: &str, cli_host: &str) -> Self {
        self.releases_api = releases_api.trim_end_matches('/').to_string();
        self.cli_host = cli_host.trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str, message: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(message, e))?;

        if !response.status().is_success() {
            return Err(fetch_error(
                message,
                anyhow!("HTTP {} fetching {}", response.status(), url),
            ));
        }

        Ok(response)
    }
}

fn fetch_error(message: &str, source: impl Into<anyhow::Error>) -> DopplerError {
    DopplerError::Fetch {
        message: message.to_string(),
        source: source.into(),
    }
}

impl UpdateSource for ApiClient {
    fn latest_version(&self) -> Result<String> {
        const MESSAGE: &str = "Unable to fetch latest CLI version";

        let url = format!("{}/releases/latest", self.releases_api);
        let release: Release = self
            .get(&url, MESSAGE)?
            .json()
            .map_err(|e| fetch_error(MESSAGE, e))?;

        Ok(release.version().to_string())
    }

    fn install_script(&self) -> Result<Vec<u8>> {
        const MESSAGE: &str = "Unable to download CLI install script";

        let url = format!("{}/install.sh", self.cli_host);
        let bytes = self
            .get(&url, MESSAGE)?
            .bytes()
            .map_err(|e| fetch_error(MESSAGE, e))?;

        Ok(bytes.to_vec())
    }

    fn changelog(&self) -> Result<ChangeLog> {
        const MESSAGE: &str = "Unable to fetch CLI changelog";

        let url = format!("{}/releases", self.releases_api);
        let releases: Vec<Release> = self
            .get(&url, MESSAGE)?
            .json()
            .map_err(|e| fetch_error(MESSAGE, e))?;

        Ok(ChangeLog::from_releases(releases))
    }
}
