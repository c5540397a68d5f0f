//! corex runtime - CoreOS release handling and xhyve launch.
//!
//! This crate implements release version resolution, the local image
//! store, the cancelable artifact acquisition pipeline, and the xhyve
//! launch configuration builder.

pub mod fetch;
pub mod release;
pub mod store;
pub mod xhyve;

// Re-export common types
pub use fetch::{ArtifactVerifier, DigestVerifier, Downloader};
pub use release::{ArtifactKind, Version, VersionResolver};
pub use store::{ImageStore, LocalImage};
pub use xhyve::{build_args, launch, KernelConfig, LaunchSpec};

/// corex runtime version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
