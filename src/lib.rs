//! pg-loadtest library
//!
//! Synthetic load generation for PostgreSQL.
//!
//! - `populate`: batch-load product rows, committing after every batch
//! - `lifecycle`: run insert / update / delete phases over an id range split
//!   across independent concurrent workers
//!
//! # CLI Usage
//!
//! ```bash
//! # Load 10k products using the connector config's host and database
//! pg-loadtest --connector-config debezium-connector-config/pg-connector.json \
//!   populate --row-count 10000 --batch-size 1000
//!
//! # Insert, update, then delete one million rows with 10 workers
//! pg-loadtest lifecycle --phase all --table lifecycle_test --create-table
//! ```

pub mod loadtest;
pub mod logging;
