//! Shared utilities for supabase admin tooling
//!
//! This crate provides common functionality used by the admin binaries:
//! - Structured logging initialization
//! - Environment variable parsing helpers
//! - Local env file loading

pub mod config;
pub mod logging;

pub use config::{load_env_file, ConfigExt};
pub use logging::init_logging;
