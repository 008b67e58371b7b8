//! # Error Types
//!
//! Defines `PaasDbError`, the unified error enum for every failure mode in
//! paasdb. Every variant includes enough context (the offending scheme, the
//! redacted URL, the supplementary-source path) to debug immediately without
//! reproducing the hosting environment.

use thiserror::Error;

/// All errors that can occur while resolving a connection configuration.
#[derive(Error, Debug)]
pub enum PaasDbError {
    #[error("Unknown database scheme '{scheme}'. Known schemes: postgres://, postgresql://, pgsql://, mysql://, sqlite://\n  Pass an explicit engine to use a driver outside this set")]
    UnknownScheme { scheme: String },

    #[error("Cannot parse connection URL '{url}': {source}")]
    MalformedUrl {
        /// The rejected URL with any password masked.
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to load supplementary environment: {message}")]
    EnvironmentLoad { message: String },

    #[error("No database connection URL found. paasdb scans the environment in this order:\n  1. any variable named *DATABASE_URL\n  2. HEROKU_POSTGRESQL_*_URL\n  3. OPENSHIFT_*_DB_URL\n  4. DOTCLOUD_*_*SQL_URL\n  5. the caller-supplied default\n\nSet DATABASE_URL or pass a default connection URL")]
    NoConnectionUrl,
}

pub type Result<T> = std::result::Result<T, PaasDbError>;
