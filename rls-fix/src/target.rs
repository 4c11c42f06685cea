//! Connection target resolution
//!
//! Turns the configured project URL into the project ref and the concrete
//! host/port/database/user combinations the tool may connect with.

use crate::config::Config;
use crate::error::FatalError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const DIRECT_PORT: u16 = 5432;
pub const DATABASE: &str = "postgres";
pub const SUPERUSER: &str = "postgres";

static PROJECT_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://([^.]+)\.supabase\.co").expect("project ref pattern is valid")
});

/// Identifier of the managed database instance, e.g. `abcdefghijkl`
/// from `https://abcdefghijkl.supabase.co`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef(String);

impl ProjectRef {
    /// Extract the project ref from a project URL.
    pub fn from_url(url: &str) -> Result<Self, FatalError> {
        PROJECT_REF_PATTERN
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| FatalError::InvalidUrl(url.to_string()))
    }

    /// Dashboard page where the database password can be found or reset.
    pub fn dashboard_url(&self) -> String {
        format!(
            "https://supabase.com/dashboard/project/{}/settings/database",
            self.0
        )
    }

    /// Direct connection to the project's own database host.
    pub fn direct_target(&self) -> ConnectTarget {
        ConnectTarget {
            host: format!("db.{}.supabase.co", self.0),
            port: DIRECT_PORT,
            dbname: DATABASE.to_string(),
            user: SUPERUSER.to_string(),
        }
    }

    /// Connection through the shared pooler, which identifies the project by user name.
    pub fn pooler_target(&self, host: &str, port: u16) -> ConnectTarget {
        ConnectTarget {
            host: host.to_string(),
            port,
            dbname: DATABASE.to_string(),
            user: format!("{}.{}", SUPERUSER, self.0),
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where to connect and as whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
}

/// One way of reaching the database: a target plus the secret to present.
#[derive(Clone)]
pub struct ConnectionMethod {
    pub name: &'static str,
    pub target: ConnectTarget,
    pub password: String,
}

impl fmt::Debug for ConnectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionMethod")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection methods in the order they should be tried.
///
/// Direct and pooler connections use the database password; the service
/// role key is only tried when it is configured.
pub fn connection_methods(config: &Config) -> Vec<ConnectionMethod> {
    let project_ref = &config.project_ref;
    let mut methods = vec![
        ConnectionMethod {
            name: "Direct connection",
            target: project_ref.direct_target(),
            password: config.db_password.clone(),
        },
        ConnectionMethod {
            name: "Pooler connection",
            target: project_ref.pooler_target(&config.pooler_host, config.pooler_port),
            password: config.db_password.clone(),
        },
    ];

    if let Some(key) = &config.service_role_key {
        methods.push(ConnectionMethod {
            name: "Service role key auth",
            target: project_ref.direct_target(),
            password: key.clone(),
        });
    }

    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_POOLER_HOST;

    fn config(service_role_key: Option<&str>) -> Config {
        Config::new(
            Some("https://abcdefghijkl.supabase.co".into()),
            Some("hunter2".into()),
            service_role_key.map(String::from),
            DEFAULT_POOLER_HOST.into(),
            6543,
        )
        .unwrap()
    }

    #[test]
    fn test_extracts_project_ref() {
        let project_ref = ProjectRef::from_url("https://abcdefghijkl.supabase.co").unwrap();
        assert_eq!(project_ref.to_string(), "abcdefghijkl");
    }

    #[test]
    fn test_pattern_is_not_anchored() {
        let project_ref =
            ProjectRef::from_url("  https://abcdefghijkl.supabase.co/rest/v1/").unwrap();
        assert_eq!(project_ref.to_string(), "abcdefghijkl");
    }

    #[test]
    fn test_rejects_foreign_hosts() {
        for url in [
            "http://abcdefghijkl.supabase.co",
            "https://example.com",
            "https://localhost:54321",
            "",
        ] {
            assert!(
                matches!(ProjectRef::from_url(url), Err(FatalError::InvalidUrl(_))),
                "{url} should not resolve"
            );
        }
    }

    #[test]
    fn test_direct_target() {
        let target = ProjectRef("abc".into()).direct_target();
        assert_eq!(
            target,
            ConnectTarget {
                host: "db.abc.supabase.co".into(),
                port: 5432,
                dbname: "postgres".into(),
                user: "postgres".into(),
            }
        );
    }

    #[test]
    fn test_pooler_user_carries_project_ref() {
        let target = ProjectRef("abc".into()).pooler_target("pooler.example", 6543);
        assert_eq!(target.user, "postgres.abc");
        assert_eq!(target.port, 6543);
    }

    #[test]
    fn test_methods_without_service_role_key() {
        let config = config(None);
        let methods = connection_methods(&config);

        let names: Vec<_> = methods.iter().map(|m| m.name).collect();
        assert_eq!(names, ["Direct connection", "Pooler connection"]);
        assert!(methods.iter().all(|m| m.password == "hunter2"));
    }

    #[test]
    fn test_service_role_key_is_tried_last() {
        let config = config(Some("service-key"));
        let methods = connection_methods(&config);

        assert_eq!(methods.len(), 3);
        assert_eq!(methods[2].name, "Service role key auth");
        assert_eq!(methods[2].password, "service-key");
        assert_eq!(methods[2].target, config.project_ref.direct_target());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = config(None);
        let rendered = format!("{:?}", connection_methods(&config));
        assert!(!rendered.contains("hunter2"));
    }
}
