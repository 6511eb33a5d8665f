//! Connection settings shared by the `pg-loadtest` commands.
//!
//! Connection parameters can come from a Debezium-style connector JSON file,
//! from individual CLI flags / `PG*` environment variables, or from a raw
//! connection string. Whatever the source, they end up as a libpq conninfo
//! string handed to `tokio_postgres`.

pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod ident;
pub mod params;

pub use args::ConnectionArgs;
pub use client::connect;
pub use config::{ConnectorConfig, PortValue};
pub use error::ConnectionError;
pub use ident::{qualified_table, quote_ident};
pub use params::{mask_connection_password, ConnectionParams, REDACTED_CONNECTION};
