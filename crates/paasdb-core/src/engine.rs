use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PaasDbError, Result};

/// Database engine selected by a connection URL's scheme.
///
/// The variant is the normalized form used throughout the crate; the string a
/// consuming framework wants for it comes from a [`DriverMap`], so no single
/// framework's naming convention leaks into the parsing core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engine {
    Postgres,
    MySql,
    Sqlite,
    /// Caller-supplied override carrying the exact driver identifier to emit.
    Custom(String),
}

impl Engine {
    /// Resolve a URL scheme to an engine.
    ///
    /// Pure lookup, case-sensitive. Schemes outside the known set fail with
    /// [`PaasDbError::UnknownScheme`]; callers that need another driver pass
    /// an explicit [`Engine::Custom`] override instead.
    pub fn from_scheme(scheme: &str) -> Result<Self> {
        match scheme {
            "postgres" | "postgresql" | "pgsql" => Ok(Engine::Postgres),
            "mysql" => Ok(Engine::MySql),
            "sqlite" => Ok(Engine::Sqlite),
            other => Err(PaasDbError::UnknownScheme {
                scheme: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Postgres => write!(f, "postgres"),
            Engine::MySql => write!(f, "mysql"),
            Engine::Sqlite => write!(f, "sqlite"),
            Engine::Custom(id) => write!(f, "{}", id),
        }
    }
}

/// Translation from [`Engine`] to the driver-identifier string a specific
/// consuming framework expects.
///
/// This is the single substitution point for driver naming: swap the map and
/// every config resolved through it targets another framework's adapter
/// layer. [`Engine::Custom`] identifiers pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverMap {
    pub postgres: Cow<'static, str>,
    pub mysql: Cow<'static, str>,
    pub sqlite: Cow<'static, str>,
}

impl Default for DriverMap {
    fn default() -> Self {
        Self {
            postgres: Cow::Borrowed("postgresql"),
            mysql: Cow::Borrowed("mysql"),
            sqlite: Cow::Borrowed("sqlite"),
        }
    }
}

impl DriverMap {
    /// Look up the driver identifier for an engine.
    pub fn driver_id<'a>(&'a self, engine: &'a Engine) -> &'a str {
        match engine {
            Engine::Postgres => &self.postgres,
            Engine::MySql => &self.mysql,
            Engine::Sqlite => &self.sqlite,
            Engine::Custom(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_scheme_aliases() {
        for scheme in ["postgres", "postgresql", "pgsql"] {
            assert_eq!(
                Engine::from_scheme(scheme).unwrap(),
                Engine::Postgres,
                "scheme '{}' should resolve to Postgres",
                scheme
            );
        }
    }

    #[test]
    fn test_mysql_and_sqlite_schemes() {
        assert_eq!(Engine::from_scheme("mysql").unwrap(), Engine::MySql);
        assert_eq!(Engine::from_scheme("sqlite").unwrap(), Engine::Sqlite);
    }

    #[test]
    fn test_unknown_scheme_fails() {
        let err = Engine::from_scheme("mssql").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("mssql"), "Error should name the scheme: {}", msg);
    }

    #[test]
    fn test_scheme_lookup_is_case_sensitive() {
        assert!(Engine::from_scheme("Postgres").is_err());
        assert!(Engine::from_scheme("SQLITE").is_err());
    }

    #[test]
    fn test_driver_map_defaults() {
        let map = DriverMap::default();
        assert_eq!(map.driver_id(&Engine::Postgres), "postgresql");
        assert_eq!(map.driver_id(&Engine::MySql), "mysql");
        assert_eq!(map.driver_id(&Engine::Sqlite), "sqlite");
    }

    #[test]
    fn test_driver_map_custom_passthrough() {
        let map = DriverMap::default();
        let custom = Engine::Custom("odbc.mssql".to_string());
        assert_eq!(map.driver_id(&custom), "odbc.mssql");
    }

    #[test]
    fn test_driver_map_swapped_for_framework() {
        // A consumer targeting Django swaps the whole map; the core never
        // hard-codes these strings.
        let map = DriverMap {
            postgres: "django.db.backends.postgresql_psycopg2".into(),
            mysql: "django.db.backends.mysql".into(),
            sqlite: "django.db.backends.sqlite3".into(),
        };
        assert_eq!(
            map.driver_id(&Engine::Postgres),
            "django.db.backends.postgresql_psycopg2"
        );
        assert_eq!(map.driver_id(&Engine::Sqlite), "django.db.backends.sqlite3");
    }
}
