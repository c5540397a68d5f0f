//! Local image store.
//!
//! Placed artifacts live flat in one directory as
//! `<channel>.<version>.<artifact-file>` plus a `.sig` companion. The
//! store is the download cache; it persists across process invocations.

use std::path::{Path, PathBuf};

use corex_core::{CoreError, Result};

use crate::release::{placed_file_name, ArtifactKind, Version};

/// A placed artifact discovered in the image store.
#[derive(Debug, Clone)]
pub struct LocalImage {
    pub channel: String,
    pub version: Version,
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Read/write access to the image directory.
pub struct ImageStore {
    directory: PathBuf,
}

impl ImageStore {
    /// Create a store over an image directory.
    ///
    /// The directory is not created here; the CLI creates the default
    /// location and explicit paths are taken as given.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The image directory this store reads and writes.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Canonical path of a placed artifact.
    pub fn artifact_path(&self, channel: &str, version: &str, kind: ArtifactKind) -> PathBuf {
        self.directory.join(placed_file_name(channel, version, kind))
    }

    /// Canonical path of a placed artifact's signature.
    pub fn signature_path(&self, channel: &str, version: &str, kind: ArtifactKind) -> PathBuf {
        self.directory
            .join(format!("{}.sig", placed_file_name(channel, version, kind)))
    }

    /// Scan the directory for placed artifacts of a channel.
    ///
    /// Builds the record list fresh on every call; filenames that do not
    /// follow the placed naming convention (including `.sig` companions)
    /// are ignored. A missing directory yields an empty list.
    pub fn scan(&self, channel: &str) -> Result<Vec<LocalImage>> {
        if !self.directory.exists() {
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some((version, kind)) = parse_placed_name(channel, name) {
                images.push(LocalImage {
                    channel: channel.to_string(),
                    version,
                    kind,
                    path: entry.path(),
                });
            }
        }
        Ok(images)
    }

    /// Most recent locally available version for a channel.
    ///
    /// A version counts as present when its kernel artifact is placed;
    /// versions are ordered numerically, not by filename.
    pub fn latest_local_version(&self, channel: &str) -> Result<Version> {
        self.scan(channel)?
            .into_iter()
            .filter(|image| image.kind == ArtifactKind::Kernel)
            .map(|image| image.version)
            .max()
            .ok_or_else(|| {
                CoreError::NotFound(format!(
                    "no local image files for channel {channel} in {}",
                    self.directory.display()
                ))
            })
    }
}

/// Parse a placed file name into its version and artifact kind.
fn parse_placed_name(channel: &str, name: &str) -> Option<(Version, ArtifactKind)> {
    let rest = name.strip_prefix(channel)?.strip_prefix('.')?;
    for kind in [ArtifactKind::Kernel, ArtifactKind::Initrd] {
        if let Some(version_dot) = rest.strip_suffix(kind.file_name()) {
            let version = version_dot.strip_suffix('.')?;
            return version.parse::<Version>().ok().map(|v| (v, kind));
        }
    }
    None
}
