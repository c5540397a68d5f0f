use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Release channel used when none is given on the command line.
pub const DEFAULT_CHANNEL: &str = "alpha";

/// Return the default image store directory (~/.corex/images).
pub fn default_image_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".corex"))
        .unwrap_or_else(|| PathBuf::from(".corex"))
        .join("images")
}

/// Fetch configuration
///
/// Identifies which release line to follow and where placed images live.
/// Constructed once from CLI flags and passed by reference into the
/// runtime; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Release channel (alpha, beta, stable)
    pub channel: String,

    /// Directory holding placed kernel/initrd artifacts
    pub image_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            image_dir: default_image_dir(),
        }
    }
}

impl FetchConfig {
    /// Create a fetch configuration for a channel and image directory.
    pub fn new(channel: impl Into<String>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            channel: channel.into(),
            image_dir: image_dir.into(),
        }
    }
}
