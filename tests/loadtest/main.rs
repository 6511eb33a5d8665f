//! Load testing integration tests.
//!
//! These run against a live PostgreSQL reachable through
//! `POSTGRESQL_CONNECTION_STRING` (or the default local settings) and are
//! ignored by default:
//!
//! ```bash
//! POSTGRESQL_CONNECTION_STRING="host=localhost user=postgres_user password=postgres_password dbname=inventory_db" \
//!   cargo test --test loadtest -- --ignored
//! ```

mod lifecycle_loadtest;
mod populate_loadtest;

use loadtest_connection::ConnectionParams;

/// Connection string for the test database.
pub fn connection_string() -> String {
    std::env::var("POSTGRESQL_CONNECTION_STRING")
        .unwrap_or_else(|_| ConnectionParams::default().connection_string())
}

/// Unique table name per test run.
pub fn test_table(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}_{nanos}")
}

pub async fn drop_table(table: &str) {
    let client = loadtest_connection::connect(&connection_string())
        .await
        .expect("Failed to connect to PostgreSQL");
    client
        .execute(format!("DROP TABLE IF EXISTS \"{table}\"").as_str(), &[])
        .await
        .expect("Failed to drop test table");
}
