//! Batched synthetic data loader for PostgreSQL.
//!
//! Inserts generated product rows into a table in fixed-size batches,
//! committing after every batch.

pub mod args;
pub mod error;
pub mod insert;
pub mod populator;

pub use args::PopulateArgs;
pub use error::PostgreSQLPopulatorError;
pub use insert::{
    batch_ranges, build_insert_sql, generate_row, ProductRow, DEFAULT_BATCH_SIZE, MAX_ROW_INDEX,
};
pub use populator::{PopulateMetrics, PostgreSQLPopulator};
