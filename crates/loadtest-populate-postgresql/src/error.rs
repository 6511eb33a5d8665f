//! Error types for the PostgreSQL populator.

use loadtest_connection::ConnectionError;
use thiserror::Error;

/// Errors that can occur during PostgreSQL population.
#[derive(Error, Debug)]
pub enum PostgreSQLPopulatorError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection setup error.
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
