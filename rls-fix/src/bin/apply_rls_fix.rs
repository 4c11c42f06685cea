//! Apply RLS policy fixes to a Supabase project
//!
//! Reads VITE_SUPABASE_URL (or SUPABASE_URL) and SUPABASE_DB_PASSWORD from
//! the environment, falling back to `.env.local` in the working directory.
//! Exits 1 only when it cannot get as far as running statements.

use common::{init_logging, load_env_file, ConfigExt};
use rls_fix::connect::{connect, tls_connector};
use rls_fix::{apply, Config, FatalError, Reporter, Summary, DEFAULT_ENV_FILE, STATEMENTS};
use std::io;
use tracing::{error, info, warn};

fn run(reporter: &mut Reporter<io::StdoutLock<'_>>) -> Result<Summary, FatalError> {
    let config = Config::from_env()?;
    let tls = tls_connector().map_err(FatalError::Tls)?;
    apply(&config, STATEMENTS, reporter, |method| connect(method, &tls))
}

fn main() {
    let _guard = init_logging("apply-rls-fix");

    let env_file = String::env_or("RLS_FIX_ENV_FILE", DEFAULT_ENV_FILE);
    match load_env_file(&env_file) {
        Ok(true) => info!(path = %env_file, "Loaded env file"),
        Ok(false) => info!(path = %env_file, "No env file, using process environment"),
        Err(e) => warn!(error = %e, "Ignoring unreadable env file"),
    }

    let mut reporter = Reporter::new(io::stdout().lock());

    match run(&mut reporter) {
        Ok(summary) => {
            info!(
                total = summary.total(),
                succeeded = summary.succeeded,
                failed = summary.failed,
                "RLS fix finished"
            );
        }
        Err(e) => {
            error!(error = %e, "RLS fix aborted");
            let _ = reporter.fatal(&e);
            std::process::exit(1);
        }
    }
}
