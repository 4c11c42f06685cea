//! Apply the fixed RLS repair batch to a Supabase PostgreSQL database
//!
//! A run loads configuration (resolving the project ref from its URL),
//! opens one connection and executes [`STATEMENTS`] in order, reporting
//! each outcome. Configuration, resolution and connection problems are
//! fatal; statement failures are counted and the run carries on.

pub mod config;
pub mod connect;
pub mod error;
pub mod executor;
pub mod report;
pub mod statements;
pub mod target;

use std::io::Write;

pub use config::{Config, DEFAULT_ENV_FILE};
pub use error::FatalError;
pub use executor::{execute_all, StatementRunner, Summary};
pub use report::Reporter;
pub use statements::STATEMENTS;
pub use target::{connection_methods, ConnectionMethod, ProjectRef};

/// Connect and run `statements`.
///
/// `open` is called once per connection method until one succeeds. The
/// connection is dropped before the summary is printed.
pub fn apply<R, E, F, W>(
    config: &Config,
    statements: &[&str],
    reporter: &mut Reporter<W>,
    open: F,
) -> Result<Summary, FatalError>
where
    R: StatementRunner,
    E: std::error::Error + Send + Sync + 'static,
    F: FnMut(&ConnectionMethod) -> Result<R, E>,
    W: Write,
{
    let project_ref = &config.project_ref;
    reporter.banner(project_ref, &project_ref.direct_target().host)?;

    let methods = connection_methods(config);
    let mut runner = connect::first_connection(&methods, reporter, open)?.ok_or_else(|| {
        FatalError::Connection {
            dashboard: project_ref.dashboard_url(),
        }
    })?;

    let summary = execute_all(&mut runner, statements, reporter)?;
    drop(runner);

    reporter.summary(&summary)?;
    Ok(summary)
}
