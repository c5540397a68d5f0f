//! CLI command definitions and dispatch.

mod fetch;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use corex_core::default_image_dir;

/// corex — fetch and run CoreOS VMs on xhyve.
#[derive(Parser)]
#[command(name = "corex", version, about)]
pub struct Cli {
    /// Directory where images are located
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Download a CoreOS image
    Fetch(fetch::FetchArgs),
    /// Start a CoreOS VM
    Run(run::RunArgs),
}

/// Resolve the image directory, creating the default location
/// (~/.corex/images) when no explicit path was given. Explicit paths are
/// used verbatim and must already exist.
pub(crate) fn resolve_image_dir(
    image_dir: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match image_dir {
        Some(dir) => Ok(dir),
        None => {
            let dir = default_image_dir();
            std::fs::create_dir_all(&dir)
                .map_err(|e| format!("unable to create image directory {}: {e}", dir.display()))?;
            Ok(dir)
        }
    }
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let image_dir = resolve_image_dir(cli.image_dir)?;
    match cli.command {
        Command::Fetch(args) => fetch::execute(args, image_dir).await,
        Command::Run(args) => run::execute(args, image_dir).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults_to_alpha() {
        let cli = Cli::try_parse_from(["corex", "fetch"]).unwrap();
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.channel, "alpha");
                assert!(args.version.is_none());
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_fetch_accepts_channel_and_version() {
        let cli = Cli::try_parse_from(["corex", "fetch", "beta", "773.1.0"]).unwrap();
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.channel, "beta");
                assert_eq!(args.version.as_deref(), Some("773.1.0"));
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_run_collects_repeated_root_disks() {
        let cli = Cli::try_parse_from([
            "corex", "run", "--root", "/tmp/a.img", "--root", "/tmp/b.img",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.cpus, 1);
                assert_eq!(args.memory, 1024);
                assert_eq!(
                    args.disks,
                    vec![PathBuf::from("/tmp/a.img"), PathBuf::from("/tmp/b.img")]
                );
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_image_dir_flag() {
        let cli =
            Cli::try_parse_from(["corex", "fetch", "--image-dir", "/var/corex/images"]).unwrap();
        assert_eq!(cli.image_dir, Some(PathBuf::from("/var/corex/images")));
    }
}
