//! Opening the database connection
//!
//! TLS is mandatory but the server certificate is not verified, matching
//! libpq's `sslmode=require`.

use crate::error::FatalError;
use crate::report::{error_text, Reporter};
use crate::target::ConnectionMethod;
use anyhow::{Context, Result};
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use postgres::config::SslMode;
use postgres::Client;
use postgres_openssl::MakeTlsConnector;
use std::io::Write;
use tracing::{info, warn};

/// Build the TLS connector shared by every connection attempt.
pub fn tls_connector() -> Result<MakeTlsConnector> {
    let mut builder =
        SslConnector::builder(SslMethod::tls()).context("Failed to create SSL connector")?;
    builder.set_verify(SslVerifyMode::NONE);
    Ok(MakeTlsConnector::new(builder.build()))
}

/// Open a connection using one method.
pub fn connect(method: &ConnectionMethod, tls: &MakeTlsConnector) -> Result<Client, postgres::Error> {
    let target = &method.target;
    postgres::Config::new()
        .host(&target.host)
        .port(target.port)
        .dbname(&target.dbname)
        .user(&target.user)
        .password(&method.password)
        .ssl_mode(SslMode::Require)
        .connect(tls.clone())
}

/// Try each method in order and return the first connection that opens.
///
/// Returns `Ok(None)` when every method failed.
pub fn first_connection<C, E, F, W>(
    methods: &[ConnectionMethod],
    reporter: &mut Reporter<W>,
    mut open: F,
) -> Result<Option<C>, FatalError>
where
    E: std::error::Error + Send + Sync + 'static,
    F: FnMut(&ConnectionMethod) -> Result<C, E>,
    W: Write,
{
    for method in methods {
        reporter.connecting(method.name)?;
        info!(
            method = method.name,
            host = %method.target.host,
            port = method.target.port,
            user = %method.target.user,
            "Connecting"
        );

        match open(method) {
            Ok(conn) => {
                reporter.connected()?;
                return Ok(Some(conn));
            }
            Err(e) => {
                let message = error_text(e);
                warn!(method = method.name, error = %message, "Connection failed");
                reporter.connect_failed(&message)?;
            }
        }
    }

    Ok(None)
}
