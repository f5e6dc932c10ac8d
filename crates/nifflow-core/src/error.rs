use thiserror::Error;

/// Errors raised while configuring or running a connector.
///
/// A non-2xx response from the remote service is not an error; it is
/// reported through the output record.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Failed to resolve option '{key}': {source}")]
    Resolution {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed listing from {url}: {source}")]
    ListingParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid options: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown connector: {0}")]
    UnknownConnector(String),

    #[error("Field '{field}' of connector '{connector}' has no completion source")]
    UnknownCompletion { connector: String, field: String },

    #[error("Invalid connector definition '{name}': {reason}")]
    Definition { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<url::ParseError> for ConnectorError {
    fn from(err: url::ParseError) -> Self {
        ConnectorError::InvalidUrl(err.to_string())
    }
}

/// Result type for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;
