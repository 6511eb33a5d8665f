//! Opening PostgreSQL clients.

use crate::error::ConnectionError;
use crate::params::mask_connection_password;
use tokio_postgres::{Client, NoTls};
use tracing::debug;

/// Connect to PostgreSQL and verify the connection with `SELECT 1`.
///
/// The connection future is driven on a spawned task, so this must be
/// called from within a tokio runtime.
pub async fn connect(connection_string: &str) -> Result<Client, ConnectionError> {
    debug!(
        "Connecting to PostgreSQL: {}",
        mask_connection_password(connection_string)
    );
    let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("PostgreSQL connection error: {}", e);
        }
    });

    client.simple_query("SELECT 1").await?;
    Ok(client)
}
