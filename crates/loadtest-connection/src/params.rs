//! Connection parameters and conninfo string rendering.

use crate::config::ConnectorConfig;
use crate::error::ConnectionError;
use tokio_postgres::config::{Config, Host};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DBNAME: &str = "inventory_db";
pub const DEFAULT_USER: &str = "postgres_user";
pub const DEFAULT_PASSWORD: &str = "postgres_password";

/// Parameters needed to open a PostgreSQL connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dbname: DEFAULT_DBNAME.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl ConnectionParams {
    /// Build parameters from a connector config.
    ///
    /// Host and database name must be present. Credentials always start from
    /// the load-test defaults: the connector file carries the replication
    /// account, which is not the one the load test writes with.
    pub fn from_connector_config(config: &ConnectorConfig) -> Result<Self, ConnectionError> {
        let host = config
            .hostname
            .clone()
            .ok_or(ConnectionError::MissingField("database.hostname"))?;
        let dbname = config
            .dbname
            .clone()
            .ok_or(ConnectionError::MissingField("database.dbname"))?;
        let port = match &config.port {
            Some(port) => port.to_port()?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            dbname,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        })
    }

    /// Render a libpq key/value connection string.
    pub fn connection_string(&self) -> String {
        self.render(&quote_value(&self.password))
    }

    /// Same as [`connection_string`](Self::connection_string) with the password hidden.
    pub fn masked(&self) -> String {
        self.render("***")
    }

    fn render(&self, password: &str) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_value(&self.host),
            self.port,
            quote_value(&self.dbname),
            quote_value(&self.user),
            password
        )
    }
}

fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Placeholder logged for connection strings that cannot be parsed.
pub const REDACTED_CONNECTION: &str = "<unparseable connection string, redacted>";

/// Render a connection string for safe logging.
///
/// The string is parsed as a `tokio_postgres::Config` (URL or key/value
/// form) and re-rendered from its host, port, dbname and user only; a
/// password, if present, shows up as `password=***`. Anything that fails to
/// parse is replaced wholesale by [`REDACTED_CONNECTION`].
pub fn mask_connection_password(conn_str: &str) -> String {
    let Ok(config) = conn_str.parse::<Config>() else {
        return REDACTED_CONNECTION.to_string();
    };

    let mut parts = Vec::new();
    let hosts: Vec<String> = config
        .get_hosts()
        .iter()
        .map(|host| match host {
            Host::Tcp(name) => name.clone(),
            #[cfg(unix)]
            Host::Unix(path) => path.display().to_string(),
        })
        .collect();
    if !hosts.is_empty() {
        parts.push(format!("host={}", hosts.join(",")));
    }
    let ports: Vec<String> = config.get_ports().iter().map(u16::to_string).collect();
    if !ports.is_empty() {
        parts.push(format!("port={}", ports.join(",")));
    }
    if let Some(dbname) = config.get_dbname() {
        parts.push(format!("dbname={dbname}"));
    }
    if let Some(user) = config.get_user() {
        parts.push(format!("user={user}"));
    }
    if config.get_password().is_some() {
        parts.push("password=***".to_string());
    }

    parts.join(" ")
}
