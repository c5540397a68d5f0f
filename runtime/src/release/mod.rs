//! CoreOS release addressing.
//!
//! Names and URLs for the two PXE boot artifacts published per
//! (channel, version) on the release mirror.

mod resolver;
mod version;

pub use resolver::{parse_version_id, VersionResolver, VERSION_KEY};
pub use version::Version;

/// Canonical kernel image file name within a release.
pub const VMLINUZ: &str = "coreos_production_pxe.vmlinuz";

/// Canonical compressed initrd file name within a release.
pub const INITRD: &str = "coreos_production_pxe_image.cpio.gz";

/// One of the two files required to boot a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Kernel,
    Initrd,
}

impl ArtifactKind {
    /// Canonical file name of this artifact on the release mirror.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Kernel => VMLINUZ,
            Self::Initrd => INITRD,
        }
    }

    /// File name of the artifact's detached signature.
    pub fn signature_file_name(&self) -> String {
        format!("{}.sig", self.file_name())
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Base URL of a channel's release mirror.
pub fn channel_base(channel: &str) -> String {
    format!("http://{channel}.release.core-os.net/amd64-usr")
}

/// URL of an artifact within a versioned release under `base`.
pub fn artifact_url(base: &str, version: &str, file: &str) -> String {
    format!("{base}/{version}/{file}")
}

/// File name of a placed artifact in the image store:
/// `<channel>.<version>.<artifact-file>`.
pub fn placed_file_name(channel: &str, version: &str, kind: ArtifactKind) -> String {
    format!("{}.{}.{}", channel, version, kind.file_name())
}
