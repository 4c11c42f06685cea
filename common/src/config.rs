//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration from environment variables,
//! plus loading of a local `.env`-style settings file.

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Extension trait for parsing environment variables.
///
/// Provides convenient methods for reading env vars with defaults, required values,
/// and type parsing.
pub trait ConfigExt {
    /// Get an environment variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let host = String::env_or("SUPABASE_POOLER_HOST", "localhost");
    /// ```
    fn env_or(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    /// Get the first of several environment variables that is set and non-empty.
    ///
    /// # Example
    /// ```ignore
    /// let url = String::env_first(&["VITE_SUPABASE_URL", "SUPABASE_URL"]);
    /// ```
    fn env_first(names: &[&str]) -> Option<String> {
        names
            .iter()
            .find_map(|name| env::var(name).ok().filter(|v| !v.is_empty()))
    }

    /// Get an environment variable parsed as a specific type.
    ///
    /// Returns `default` if the variable is not set or fails to parse.
    fn env_parse<T: FromStr>(name: &str, default: T) -> T {
        env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}

/// Load variables from a `.env`-style file into the process environment.
///
/// Variables already present in the environment are left untouched.
/// Returns `Ok(false)` when the file does not exist.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }

    dotenvy::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(true)
}
