//! Error types for connection configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or opening a PostgreSQL connection.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Connector config file could not be read.
    #[error("Failed to read connector config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Connector config file is not valid JSON.
    #[error("Invalid connector config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required key is absent from the connector config.
    #[error("Connector config is missing '{0}'")]
    MissingField(&'static str),

    /// Port value is not a valid TCP port.
    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    /// Table or schema name cannot be used as an identifier.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}
