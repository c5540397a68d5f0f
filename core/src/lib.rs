//! corex core - foundational types and configuration.
//!
//! This crate provides the error taxonomy and the immutable configuration
//! values shared by the corex runtime and CLI.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{default_image_dir, FetchConfig, DEFAULT_CHANNEL};
pub use error::{CoreError, Result};

/// corex version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
