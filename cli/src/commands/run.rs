//! `corex run` command.

use std::path::PathBuf;

use clap::Args;

use corex_core::{FetchConfig, DEFAULT_CHANNEL};
use corex_runtime::{ArtifactKind, Downloader, ImageStore, KernelConfig, LaunchSpec};

#[derive(Args)]
pub struct RunArgs {
    /// CoreOS image channel
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// CoreOS image version; latest local image when omitted
    #[arg(long)]
    pub version: Option<String>,

    /// Number of CPUs to allocate to the VM
    #[arg(long, default_value = "1")]
    pub cpus: u32,

    /// Amount of memory in MiB to dedicate to the VM
    #[arg(long, default_value = "1024")]
    pub memory: u32,

    /// UUID for the VM; must be a v4 UUID
    #[arg(long)]
    pub uuid: Option<String>,

    /// Disk image attached as a virtio-blk device, can be repeated;
    /// the first one is the root disk
    #[arg(long = "root")]
    pub disks: Vec<PathBuf>,

    /// SSH public key text, or a path to a public key file
    #[arg(long)]
    pub sshkey: Option<String>,

    /// URL to a cloud-config
    #[arg(long)]
    pub cloud_config: Option<String>,

    /// Additional kernel cmdline parameters, appended verbatim
    #[arg(long)]
    pub cmdline: Option<String>,

    /// Extra parameters to pass to xhyve (whitespace-separated tokens)
    #[arg(long)]
    pub extra: Option<String>,

    /// Path to the xhyve binary
    #[arg(long, default_value = "xhyve")]
    pub xhyve: PathBuf,
}

pub async fn execute(args: RunArgs, image_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = ImageStore::new(&image_dir);

    let version = match args.version {
        Some(version) => version,
        None => {
            let latest = store.latest_local_version(&args.channel).map_err(|e| {
                format!(
                    "couldn't find anything to load locally ({} channel); run `corex fetch` first: {e}",
                    args.channel
                )
            })?;
            tracing::info!(
                channel = %args.channel,
                version = %latest,
                "No version specified, using latest local image"
            );
            latest.as_str().to_string()
        }
    };

    let spec = LaunchSpec {
        channel: args.channel,
        version,
        cpus: args.cpus,
        memory_mib: args.memory,
        uuid: args.uuid,
        disks: args.disks,
        ssh_key: args.sshkey,
        cloud_config: args.cloud_config,
        kernel_args: args.cmdline.into_iter().collect(),
        extra_args: args
            .extra
            .map(|extra| extra.split_whitespace().map(String::from).collect())
            .unwrap_or_default(),
        hypervisor: args.xhyve,
    };
    spec.validate()?;

    // Make sure both boot artifacts are placed before building the launch.
    let config = FetchConfig::new(spec.channel.as_str(), &image_dir);
    let mut downloader = Downloader::new(&config, spec.version.as_str());
    let token = downloader.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    downloader.download(ArtifactKind::Kernel).await?;
    downloader.download(ArtifactKind::Initrd).await?;

    let kernel = KernelConfig::build(&spec, &store)?;
    let status = corex_runtime::launch(&spec, &kernel).await?;
    if !status.success() {
        return Err(format!("xhyve exited with {status}").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_without_local_images_points_at_fetch() {
        let tmp = TempDir::new().unwrap();
        let args = RunArgs {
            channel: "alpha".to_string(),
            version: None,
            cpus: 1,
            memory: 1024,
            uuid: None,
            disks: Vec::new(),
            sshkey: None,
            cloud_config: None,
            cmdline: None,
            extra: None,
            xhyve: PathBuf::from("xhyve"),
        };

        let err = execute(args, tmp.path().to_path_buf()).await.unwrap_err();
        assert!(err.to_string().contains("corex fetch"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_uuid_before_any_io() {
        let tmp = TempDir::new().unwrap();
        let args = RunArgs {
            channel: "alpha".to_string(),
            version: Some("773.1.0".to_string()),
            cpus: 1,
            memory: 1024,
            uuid: Some("not-a-uuid".to_string()),
            disks: Vec::new(),
            sshkey: None,
            cloud_config: None,
            cmdline: None,
            extra: None,
            xhyve: PathBuf::from("xhyve"),
        };

        let err = execute(args, tmp.path().to_path_buf()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid UUID"));
    }
}
