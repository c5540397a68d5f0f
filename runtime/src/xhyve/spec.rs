//! LaunchSpec - complete configuration for one xhyve launch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use corex_core::{CoreError, Result, DEFAULT_CHANNEL};

/// Complete, immutable configuration for one VM launch.
///
/// Built once from CLI flags and validated before any file I/O happens
/// for the launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Release channel of the boot image
    pub channel: String,

    /// Release version of the boot image
    pub version: String,

    /// Number of vCPUs (must be >= 1)
    pub cpus: u32,

    /// Guest memory in MiB
    pub memory_mib: u32,

    /// Instance UUID; must be a canonical v4 UUID when supplied,
    /// generated otherwise
    pub uuid: Option<String>,

    /// Disk images attached as virtio-blk in order; the first disk is the
    /// guest's root disk
    pub disks: Vec<PathBuf>,

    /// SSH public key text, or a path to a key file
    pub ssh_key: Option<String>,

    /// cloud-config URL handed to the guest
    pub cloud_config: Option<String>,

    /// Extra kernel command-line tokens, appended verbatim
    #[serde(default)]
    pub kernel_args: Vec<String>,

    /// Extra hypervisor argv tokens, appended verbatim
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Path to the xhyve binary
    pub hypervisor: PathBuf,
}

impl Default for LaunchSpec {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            version: String::new(),
            cpus: 1,
            memory_mib: 1024,
            uuid: None,
            disks: Vec::new(),
            ssh_key: None,
            cloud_config: None,
            kernel_args: Vec::new(),
            extra_args: Vec::new(),
            hypervisor: PathBuf::from("xhyve"),
        }
    }
}

impl LaunchSpec {
    /// Check the spec before any file I/O for the launch.
    pub fn validate(&self) -> Result<()> {
        if let Some(uuid) = &self.uuid {
            let parsed = Uuid::parse_str(uuid)
                .map_err(|_| CoreError::Validation(format!("Invalid UUID: {uuid}")))?;
            if parsed.get_version_num() != 4 {
                return Err(CoreError::Validation(format!("Not a v4 UUID: {uuid}")));
            }
        }
        if self.cpus < 1 {
            return Err(CoreError::Validation(format!(
                "Invalid number of CPUs: {}",
                self.cpus
            )));
        }
        Ok(())
    }

    /// The instance UUID: the configured one, or a freshly generated v4.
    pub fn instance_uuid(&self) -> String {
        self.uuid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}
