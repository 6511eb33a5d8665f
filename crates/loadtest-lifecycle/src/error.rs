//! Error types for the lifecycle tester.

use crate::phase::Phase;
use loadtest_connection::ConnectionError;
use thiserror::Error;

/// Errors that can occur while running a lifecycle phase.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection setup error.
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more workers did not complete their share.
    #[error("{phase} phase failed in {} of {total} workers: {}", .failures.len(), .failures.join("; "))]
    WorkersFailed {
        phase: Phase,
        total: usize,
        failures: Vec<String>,
    },
}
