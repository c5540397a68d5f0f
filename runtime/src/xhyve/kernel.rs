//! Kernel boot descriptor assembly.

use std::path::{Path, PathBuf};

use corex_core::Result;

use crate::release::ArtifactKind;
use crate::store::ImageStore;

use super::spec::LaunchSpec;

/// Base boot flags: serial console plus autologin.
const BASE_CMDLINE: &str = "earlyprintk=serial console=ttyS0 coreos.autologin";

/// Kernel boot descriptor: image paths plus the assembled guest cmdline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub vmlinuz: PathBuf,
    pub initrd: PathBuf,
    pub cmdline: String,
}

impl KernelConfig {
    /// Compute canonical image paths and assemble the guest cmdline.
    ///
    /// Segment order is fixed: base flags, `sshkey=`, `cloud-config-url=`,
    /// `root=/dev/vda` when a disk is attached, then the raw extra tokens
    /// verbatim. User tokens are never reformatted.
    pub fn build(spec: &LaunchSpec, store: &ImageStore) -> Result<Self> {
        let vmlinuz = store.artifact_path(&spec.channel, &spec.version, ArtifactKind::Kernel);
        let initrd = store.artifact_path(&spec.channel, &spec.version, ArtifactKind::Initrd);

        let mut cmdline = String::from(BASE_CMDLINE);
        if let Some(key) = &spec.ssh_key {
            let key = resolve_ssh_key(key)?;
            cmdline.push_str(" sshkey=");
            cmdline.push_str(&key);
        }
        if let Some(url) = &spec.cloud_config {
            cmdline.push_str(" cloud-config-url=");
            cmdline.push_str(url);
        }
        if !spec.disks.is_empty() {
            cmdline.push_str(" root=/dev/vda");
        }
        for arg in &spec.kernel_args {
            cmdline.push(' ');
            cmdline.push_str(arg);
        }

        Ok(Self {
            vmlinuz,
            initrd,
            cmdline,
        })
    }

    /// The firmware/boot descriptor passed as xhyve's `-f` value.
    pub fn firmware(&self) -> String {
        format!(
            "kexec,{},{},{}",
            self.vmlinuz.display(),
            self.initrd.display(),
            self.cmdline
        )
    }
}

/// An ssh key flag value is a file path when a file exists there,
/// literal key text otherwise. Either way the contents are trimmed.
fn resolve_ssh_key(value: &str) -> Result<String> {
    let path = Path::new(value);
    let text = if path.is_file() {
        std::fs::read_to_string(path)?
    } else {
        value.to_string()
    };
    Ok(text.trim().to_string())
}
