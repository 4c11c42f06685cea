//! Sequential statement execution
//!
//! Each statement is sent on its own and autocommits. A failure is reported
//! and counted, then the next statement runs; nothing is retried or rolled back.

use crate::report::{error_text, Reporter};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Something that can execute one SQL statement.
pub trait StatementRunner {
    type Error: std::error::Error + Send + Sync + 'static;

    fn run(&mut self, sql: &str) -> Result<(), Self::Error>;
}

impl StatementRunner for postgres::Client {
    type Error = postgres::Error;

    /// Simple-query protocol, so `$$`-quoted bodies go through untouched.
    fn run(&mut self, sql: &str) -> Result<(), Self::Error> {
        self.batch_execute(sql)
    }
}

/// Tally of one pass over the statement list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Run every statement once, in order, reporting each outcome.
///
/// Only a failure to write the report aborts the loop.
pub fn execute_all<R, W>(
    runner: &mut R,
    statements: &[&str],
    reporter: &mut Reporter<W>,
) -> io::Result<Summary>
where
    R: StatementRunner,
    W: Write,
{
    let total = statements.len();
    let mut summary = Summary::default();

    for (i, sql) in statements.iter().enumerate() {
        let index = i + 1;
        debug!(index, total, "Executing statement");

        match runner.run(sql) {
            Ok(()) => {
                summary.succeeded += 1;
                reporter.statement(index, total, sql, None)?;
            }
            Err(e) => {
                let message = error_text(e);
                warn!(index, error = %message, "Statement failed");
                summary.failed += 1;
                reporter.statement(index, total, sql, Some(&message))?;
            }
        }
    }

    Ok(summary)
}
