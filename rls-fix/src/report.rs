//! Console report for a run
//!
//! Everything the operator reads goes through [`Reporter`]; diagnostics go
//! to `tracing` on stderr.

use crate::error::FatalError;
use crate::executor::Summary;
use crate::target::ProjectRef;
use std::error::Error;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 50;

/// First line of the trimmed statement, cut to a fixed width.
pub fn preview(sql: &str) -> String {
    let first_line = sql.trim().lines().next().unwrap_or_default();
    let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

/// First line of an error message; database errors often carry detail lines.
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// Render an error together with its sources.
///
/// `postgres::Error` displays only its kind (`db error`); the server's
/// message is carried by its source.
pub fn error_text<E>(error: E) -> String
where
    E: Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(error))
}

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    pub fn banner(&mut self, project_ref: &ProjectRef, host: &str) -> io::Result<()> {
        writeln!(self.out, "\n🔧 APPLYING RLS FIX")?;
        self.rule()?;
        writeln!(self.out, "Project: {}", project_ref)?;
        writeln!(self.out, "Host: {}", host)?;
        self.rule()
    }

    pub fn connecting(&mut self, method: &str) -> io::Result<()> {
        writeln!(self.out, "\n📡 Trying: {}...", method)
    }

    pub fn connected(&mut self) -> io::Result<()> {
        writeln!(self.out, "✅ Connected!\n")
    }

    pub fn connect_failed(&mut self, error: &str) -> io::Result<()> {
        writeln!(self.out, "   ❌ Failed: {}", first_line(error))
    }

    /// One line per statement; `index` is 1-based.
    pub fn statement(
        &mut self,
        index: usize,
        total: usize,
        sql: &str,
        error: Option<&str>,
    ) -> io::Result<()> {
        match error {
            None => writeln!(self.out, "✅ [{}/{}] {}", index, total, preview(sql)),
            Some(error) => {
                writeln!(self.out, "❌ [{}/{}] {}", index, total, preview(sql))?;
                writeln!(self.out, "   Error: {}", first_line(error))
            }
        }
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out, "✅ Succeeded: {}", summary.succeeded)?;
        writeln!(self.out, "❌ Failed: {}", summary.failed)?;

        if summary.all_succeeded() {
            writeln!(self.out, "\n🎉 RLS policies fixed successfully!")?;
            writeln!(self.out, "   You can now create companies as super admin.")?;
        }
        Ok(())
    }

    pub fn fatal(&mut self, error: &FatalError) -> io::Result<()> {
        writeln!(self.out, "\n❌ {}", error)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fmt;

    /// Server-side message, the source of a [`ClientError`].
    #[derive(Debug)]
    pub(crate) struct ServerError(String);

    impl fmt::Display for ServerError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl Error for ServerError {}

    /// Laid out like `postgres::Error`: displays the kind only, message in the source.
    #[derive(Debug)]
    pub(crate) struct ClientError {
        kind: &'static str,
        source: ServerError,
    }

    impl ClientError {
        pub(crate) fn db(message: &str) -> Self {
            Self {
                kind: "db error",
                source: ServerError(message.to_string()),
            }
        }

        pub(crate) fn connect(message: &str) -> Self {
            Self {
                kind: "error connecting to server",
                source: ServerError(message.to_string()),
            }
        }
    }

    impl fmt::Display for ClientError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.kind)
        }
    }

    impl Error for ClientError {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.source)
        }
    }

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_preview_uses_first_line() {
        let sql = "\n  CREATE POLICY \"x\"\n  ON users FOR ALL;";
        assert_eq!(preview(sql), "CREATE POLICY \"x\"...");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let sql = "DROP POLICY IF EXISTS \"Admins can manage invitations for their company\" ON invitations;";
        let shown = preview(sql);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.starts_with("DROP POLICY IF EXISTS \"Admins"));
    }

    #[test]
    fn test_error_text_reads_server_message_from_source() {
        let text = error_text(ClientError::db(
            "ERROR: relation \"users\" does not exist\nHINT: check the schema",
        ));
        assert_eq!(
            first_line(&text),
            "db error: ERROR: relation \"users\" does not exist"
        );
    }

    #[test]
    fn test_failed_statement_shows_first_error_line() {
        let error = error_text(ClientError::db(
            "ERROR: relation \"users\" does not exist\nHINT: check the schema",
        ));
        let out = render(|r| r.statement(3, 22, "DROP TRIGGER IF EXISTS t ON users;", Some(&error)));
        assert_eq!(
            out,
            "❌ [3/22] DROP TRIGGER IF EXISTS t ON users;...\n   \
             Error: db error: ERROR: relation \"users\" does not exist\n"
        );
    }

    #[test]
    fn test_celebrates_only_without_failures() {
        let clean = render(|r| {
            r.summary(&Summary {
                succeeded: 22,
                failed: 0,
            })
        });
        assert!(clean.contains("✅ Succeeded: 22"));
        assert!(clean.contains("🎉 RLS policies fixed successfully!"));

        let partial = render(|r| {
            r.summary(&Summary {
                succeeded: 21,
                failed: 1,
            })
        });
        assert!(partial.contains("❌ Failed: 1"));
        assert!(!partial.contains("🎉"));
    }

    #[test]
    fn test_connect_failure_is_single_line() {
        let error = error_text(ClientError::db(
            "FATAL: password authentication failed for user \"postgres\"\nDETAIL: more",
        ));
        let out = render(|r| r.connect_failed(&error));
        assert_eq!(
            out,
            "   ❌ Failed: db error: FATAL: password authentication failed for user \"postgres\"\n"
        );
    }
}
