//! CLI argument definitions for the batch loader.

use clap::Args;

/// Arguments for `pg-loadtest populate`.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Target table (name, description, quantity columns)
    #[arg(long, default_value = "products")]
    pub table: String,

    /// Number of rows to insert
    #[arg(long, default_value = "10000")]
    pub row_count: u64,

    /// Rows per INSERT; each batch is committed on its own
    #[arg(long, default_value = "1000")]
    pub batch_size: usize,

    /// Index of the first generated row
    #[arg(long, default_value = "0")]
    pub start_index: u64,

    /// Create the table if it does not exist
    #[arg(long)]
    pub create_table: bool,

    /// Validate configuration without touching the database
    #[arg(long)]
    pub dry_run: bool,
}
