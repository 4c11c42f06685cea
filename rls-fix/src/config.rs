//! Configuration from environment variables
//!
//! Values normally come from `.env.local`, which the binary loads into the
//! process environment before calling [`Config::from_env`].

use crate::error::FatalError;
use crate::target::ProjectRef;
use common::ConfigExt;

/// Env file read from the working directory unless `RLS_FIX_ENV_FILE` is set.
pub const DEFAULT_ENV_FILE: &str = ".env.local";

pub const DEFAULT_POOLER_HOST: &str = "aws-0-us-east-1.pooler.supabase.com";
pub const DEFAULT_POOLER_PORT: u16 = 6543;

/// Validated settings for one run.
pub struct Config {
    pub project_ref: ProjectRef,
    pub db_password: String,
    pub service_role_key: Option<String>,
    pub pooler_host: String,
    pub pooler_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, FatalError> {
        Self::new(
            String::env_first(&["VITE_SUPABASE_URL", "SUPABASE_URL"]),
            String::env_first(&["SUPABASE_DB_PASSWORD"]),
            String::env_first(&["SUPABASE_SERVICE_ROLE_KEY"]),
            String::env_first(&["SUPABASE_POOLER_HOST"])
                .unwrap_or_else(|| DEFAULT_POOLER_HOST.to_string()),
            u16::env_parse("SUPABASE_POOLER_PORT", DEFAULT_POOLER_PORT),
        )
    }

    /// Validate raw values. Empty strings count as missing.
    ///
    /// The URL is checked, then resolved to a project ref, before the
    /// password is looked at.
    pub fn new(
        url: Option<String>,
        db_password: Option<String>,
        service_role_key: Option<String>,
        pooler_host: String,
        pooler_port: u16,
    ) -> Result<Self, FatalError> {
        let url = url.filter(|v| !v.is_empty()).ok_or(FatalError::MissingUrl)?;
        let project_ref = ProjectRef::from_url(&url)?;

        let db_password = db_password
            .filter(|v| !v.is_empty())
            .ok_or_else(|| FatalError::MissingPassword {
                dashboard: project_ref.dashboard_url(),
            })?;

        let pooler_host = if pooler_host.is_empty() {
            DEFAULT_POOLER_HOST.to_string()
        } else {
            pooler_host
        };

        Ok(Self {
            project_ref,
            db_password,
            service_role_key: service_role_key.filter(|v| !v.is_empty()),
            pooler_host,
            pooler_port,
        })
    }
}
