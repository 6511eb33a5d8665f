//! Debezium connector config parsing.
//!
//! Both the bare property map and the Kafka Connect REST payload
//! (`{"name": ..., "config": {...}}`) are accepted. Only the host, port and
//! database name are read; everything else, including the connector's own
//! `database.user` / `database.password`, is ignored.

use crate::error::ConnectionError;
use serde::Deserialize;
use std::path::Path;

/// Connection-related properties of a PostgreSQL connector config.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConnectorConfig {
    #[serde(rename = "database.hostname")]
    pub hostname: Option<String>,

    #[serde(rename = "database.port")]
    pub port: Option<PortValue>,

    #[serde(rename = "database.dbname")]
    pub dbname: Option<String>,
}

/// Connector configs written by hand often quote the port.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

impl PortValue {
    /// Resolve to a TCP port number.
    pub fn to_port(&self) -> Result<u16, ConnectionError> {
        match self {
            PortValue::Number(n) => {
                u16::try_from(*n).map_err(|_| ConnectionError::InvalidPort(n.to_string()))
            }
            PortValue::Text(s) => s
                .trim()
                .parse::<u16>()
                .map_err(|_| ConnectionError::InvalidPort(s.clone())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConnectorFile {
    Wrapped { config: ConnectorConfig },
    Flat(ConnectorConfig),
}

impl ConnectorConfig {
    /// Parse a connector config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConnectionError> {
        let file: ConnectorFile = serde_json::from_str(json)?;
        Ok(match file {
            ConnectorFile::Wrapped { config } => config,
            ConnectorFile::Flat(config) => config,
        })
    }

    /// Read and parse a connector config file.
    pub fn from_file(path: &Path) -> Result<Self, ConnectionError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConnectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}
