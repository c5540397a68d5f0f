//! Cancelable artifact acquisition.
//!
//! Turns a (channel, version) pair into verified, atomically placed files
//! in the image store. Downloads land in a private scratch directory
//! shared by both artifact kinds of one session and are renamed into
//! their canonical paths only after the verification hook has run.

mod verify;

pub use verify::{ArtifactVerifier, DigestVerifier};

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use corex_core::{CoreError, FetchConfig, Result};

use crate::release::{self, ArtifactKind};
use crate::store::ImageStore;

/// Downloads one release's artifacts into the image store.
///
/// One instance covers one acquisition session: a kernel and an initrd
/// for a single (channel, version). Calls to [`Downloader::download`] are
/// serialized by `&mut self`; cancellation arrives from outside through
/// the token handed out by [`Downloader::cancel_token`].
pub struct Downloader {
    channel: String,
    version: String,
    base_url: String,
    store: ImageStore,
    client: reqwest::Client,
    verifier: Arc<dyn ArtifactVerifier>,
    cancel: CancellationToken,
    scratch: Option<TempDir>,
}

impl Downloader {
    /// Create a downloader for a release against the public mirror.
    pub fn new(config: &FetchConfig, version: impl Into<String>) -> Self {
        let base_url = release::channel_base(&config.channel);
        Self::with_base(config, version, base_url)
    }

    /// Create a downloader against an explicit mirror base URL.
    pub fn with_base(
        config: &FetchConfig,
        version: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            channel: config.channel.clone(),
            version: version.into(),
            base_url: base_url.into(),
            store: ImageStore::new(&config.image_dir),
            client: reqwest::Client::new(),
            verifier: Arc::new(DigestVerifier),
            cancel: CancellationToken::new(),
            scratch: None,
        }
    }

    /// Replace the verification hook.
    pub fn with_verifier(mut self, verifier: Arc<dyn ArtifactVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Token that cancels the in-flight download when triggered.
    ///
    /// `CancellationToken::cancel` is idempotent and never blocks, so
    /// cancelling twice or with no download in flight is safe. Once
    /// cancelled, subsequent [`Downloader::download`] calls on this
    /// instance fail fast with `Cancelled`.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Ensure one artifact of the release is placed in the image store.
    ///
    /// Cache hit returns immediately with no network access, making the
    /// call idempotent once placed. Otherwise a worker task fetches the
    /// artifact, then its signature, then runs the verifier; the caller
    /// races the worker against the cancellation token. On cancellation
    /// the worker is aborted and joined before the scratch directory is
    /// removed, so when `Cancelled` is returned cleanup has finished.
    pub async fn download(&mut self, kind: ArtifactKind) -> Result<()> {
        let target = self.store.artifact_path(&self.channel, &self.version, kind);
        if target.exists() {
            tracing::info!(
                file = kind.file_name(),
                channel = %self.channel,
                version = %self.version,
                "Found cached artifact"
            );
            return Ok(());
        }

        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let scratch = match &self.scratch {
            Some(dir) => dir.path().to_path_buf(),
            None => {
                let dir = tempfile::Builder::new().prefix("corex-fetch-").tempdir()?;
                let path = dir.path().to_path_buf();
                self.scratch = Some(dir);
                path
            }
        };

        tracing::info!(
            file = kind.file_name(),
            channel = %self.channel,
            version = %self.version,
            "Downloading artifact"
        );

        let file_path = scratch.join(kind.file_name());
        let sig_path = scratch.join(kind.signature_file_name());

        let mut worker = {
            let client = self.client.clone();
            let verifier = Arc::clone(&self.verifier);
            let url = release::artifact_url(&self.base_url, &self.version, kind.file_name());
            let sig_url = format!("{url}.sig");
            let file_path = file_path.clone();
            let sig_path = sig_path.clone();
            tokio::spawn(async move {
                fetch_to_file(&client, &url, &file_path).await?;
                fetch_to_file(&client, &sig_url, &sig_path).await?;
                verifier.verify(&file_path, &sig_path)
            })
        };

        let worker_result = tokio::select! {
            res = &mut worker => res,
            _ = self.cancel.cancelled() => {
                worker.abort();
                // Join before cleanup: the scratch directory must not be
                // removed while the worker can still write into it.
                let _ = (&mut worker).await;
                self.scratch = None;
                return Err(CoreError::Cancelled);
            }
        };

        match worker_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.scratch = None;
                return Err(e);
            }
            Err(e) => {
                self.scratch = None;
                return Err(CoreError::Io(std::io::Error::other(format!(
                    "download worker failed: {e}"
                ))));
            }
        }

        // Move the verified pair into the store. If one rename fails the
        // other is still attempted, and the failures are reported together.
        let sig_target = self.store.signature_path(&self.channel, &self.version, kind);
        let mut failures = Vec::new();
        if let Err(e) = std::fs::rename(&file_path, &target) {
            failures.push(format!(
                "rename {} -> {}: {e}",
                file_path.display(),
                target.display()
            ));
        }
        if let Err(e) = std::fs::rename(&sig_path, &sig_target) {
            failures.push(format!(
                "rename {} -> {}: {e}",
                sig_path.display(),
                sig_target.display()
            ));
        }
        self.scratch = None;

        if !failures.is_empty() {
            return Err(CoreError::Placement(failures));
        }

        tracing::info!(
            file = kind.file_name(),
            target = %target.display(),
            "Artifact placed"
        );
        Ok(())
    }
}

/// Stream an HTTP GET response body into a file.
async fn fetch_to_file(client: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    tracing::debug!(url = %url, target = %path.display(), "Fetching");

    let mut response = client.get(url).send().await.map_err(|e| CoreError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(CoreError::Network {
            url: url.to_string(),
            message: format!("HTTP {}", response.status()),
        });
    }

    let mut file = tokio::fs::File::create(path).await?;
    loop {
        let chunk = response.chunk().await.map_err(|e| CoreError::Network {
            url: url.to_string(),
            message: format!("truncated body: {e}"),
        })?;
        let Some(chunk) = chunk else {
            break;
        };
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
