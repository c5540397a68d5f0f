//! Remote version resolution.
//!
//! A channel's currently published version is read from the mirror's
//! `current/version.txt`, a newline-delimited `KEY=VALUE` manifest.

use corex_core::{CoreError, Result};

use super::channel_base;

/// Manifest key holding the published version identifier.
pub const VERSION_KEY: &str = "COREOS_VERSION_ID";

/// Resolves a channel to its currently published version.
pub struct VersionResolver {
    client: reqwest::Client,
    base_url: String,
}

impl VersionResolver {
    /// Create a resolver for a release channel.
    pub fn new(channel: &str) -> Self {
        Self::with_base(channel_base(channel))
    }

    /// Create a resolver against an explicit mirror base URL.
    pub fn with_base(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch and parse the version manifest.
    ///
    /// Returns the value of `COREOS_VERSION_ID`, `NotFound` if the key is
    /// absent from a successfully fetched manifest, or `Network` if the
    /// fetch fails. Never retries; the caller decides.
    pub async fn resolve(&self) -> Result<String> {
        let url = format!("{}/current/version.txt", self.base_url);
        tracing::debug!(url = %url, "Fetching version manifest");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CoreError::Network {
                url: url.clone(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().await.map_err(|e| CoreError::Network {
            url: url.clone(),
            message: format!("truncated body: {e}"),
        })?;

        parse_version_id(&body)
            .ok_or_else(|| CoreError::NotFound(format!("{VERSION_KEY} not present in {url}")))
    }
}

/// Extract `COREOS_VERSION_ID` from a `KEY=VALUE` manifest body.
///
/// Lines without a `=` are skipped.
pub fn parse_version_id(body: &str) -> Option<String> {
    for line in body.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        if key == VERSION_KEY {
            return Some(value.to_string());
        }
    }
    None
}
