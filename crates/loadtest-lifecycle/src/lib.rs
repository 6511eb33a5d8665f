//! DML lifecycle load test for PostgreSQL.
//!
//! A phase (insert, update or delete) covers a contiguous id range. The range
//! is split evenly across independent workers; each worker opens its own
//! connection, executes its share in pages of `batch_size` rows inside one
//! transaction, and commits. Workers share nothing, so the only aggregation
//! is the wall-clock time and the per-worker row counts.

pub mod args;
pub mod error;
pub mod metrics;
pub mod partitioner;
pub mod phase;
pub mod runner;
pub mod worker;

pub use args::LifecycleArgs;
pub use error::LifecycleError;
pub use metrics::{PhaseReport, WorkerReport};
pub use partitioner::{describe_partitioning, partition, WorkerAssignment};
pub use phase::{Phase, PhaseSelection};
pub use runner::{create_table, run_phase, LifecycleConfig};
pub use worker::run_worker;
