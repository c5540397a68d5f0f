//! corex CLI library.

pub mod commands;
