//! Fatal errors that abort a run with exit code 1

use std::io;
use thiserror::Error;

/// Conditions that stop the tool before (or while) connecting.
///
/// Per-statement failures are never represented here; they are counted
/// and reported by the executor instead.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("Missing VITE_SUPABASE_URL or SUPABASE_URL in .env.local")]
    MissingUrl,

    #[error(
        "SUPABASE_DB_PASSWORD not found in .env.local\n\n   \
         Find your database password at:\n   {dashboard}\n\n   \
         Then add to .env.local:\n   SUPABASE_DB_PASSWORD=your-database-password"
    )]
    MissingPassword { dashboard: String },

    #[error("Could not extract project ref from SUPABASE_URL ({0})")]
    InvalidUrl(String),

    #[error(
        "All connection methods failed.\n   \
         Make sure SUPABASE_DB_PASSWORD is correct in .env.local\n   \
         Get it from: {dashboard}"
    )]
    Connection { dashboard: String },

    #[error("Failed to set up TLS: {0:#}")]
    Tls(anyhow::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}
