//! `corex fetch` command.

use std::path::PathBuf;

use clap::Args;

use corex_core::{FetchConfig, DEFAULT_CHANNEL};
use corex_runtime::{ArtifactKind, Downloader, VersionResolver};

#[derive(Args)]
pub struct FetchArgs {
    /// Release channel to download from
    #[arg(default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Release version; resolved from the mirror when omitted
    pub version: Option<String>,
}

pub async fn execute(
    args: FetchArgs,
    image_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let version = match args.version {
        Some(version) => version,
        None => {
            VersionResolver::new(&args.channel)
                .resolve()
                .await
                .map_err(|e| {
                    format!("unable to get version for channel {}: {e}", args.channel)
                })?
        }
    };
    tracing::debug!(channel = %args.channel, version = %version, "Fetching release");

    let config = FetchConfig::new(args.channel.as_str(), image_dir);
    let mut downloader = Downloader::new(&config, version.as_str());

    // Ctrl-C cancels the in-flight download; the token is idempotent, so
    // a signal with nothing in flight is a no-op.
    let token = downloader.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    downloader.download(ArtifactKind::Kernel).await?;
    downloader.download(ArtifactKind::Initrd).await?;

    println!(
        "Successfully downloaded CoreOS {} ({})",
        args.channel, version
    );
    Ok(())
}
