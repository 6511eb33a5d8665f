//! CLI argument definitions for the lifecycle tester.

use crate::phase::PhaseSelection;
use crate::runner::{
    LifecycleConfig, DEFAULT_BATCH_SIZE, DEFAULT_PROCESSES, DEFAULT_SCHEMA, DEFAULT_TOTAL_ROWS,
};
use clap::Args;
use std::path::PathBuf;

/// Arguments for `pg-loadtest lifecycle`.
#[derive(Args, Clone, Debug)]
pub struct LifecycleArgs {
    /// The DML phase to execute
    #[arg(long, value_enum)]
    pub phase: PhaseSelection,

    /// The name of the target table
    #[arg(long)]
    pub table: String,

    /// Schema containing the target table
    #[arg(long, default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    /// Number of concurrent workers, each with its own connection
    #[arg(long, default_value_t = DEFAULT_PROCESSES)]
    pub processes: usize,

    /// Total rows covered by each phase
    #[arg(long, default_value_t = DEFAULT_TOTAL_ROWS)]
    pub total_rows: u64,

    /// Rows per statement
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// First id of the range
    #[arg(long, default_value = "0")]
    pub start_id: u64,

    /// Create the table (id BIGINT PRIMARY KEY, payload TEXT) if it does not exist
    #[arg(long)]
    pub create_table: bool,

    /// Write phase reports as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub metrics_output: Option<PathBuf>,

    /// Validate configuration and print the work distribution without touching the database
    #[arg(long)]
    pub dry_run: bool,
}

impl LifecycleArgs {
    pub fn config(&self) -> LifecycleConfig {
        LifecycleConfig {
            table: self.table.clone(),
            schema: self.schema.clone(),
            processes: self.processes,
            total_rows: self.total_rows,
            batch_size: self.batch_size,
            start_id: self.start_id,
        }
    }
}
