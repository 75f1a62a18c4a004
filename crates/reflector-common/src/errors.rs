use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures at the host/content boundary.
///
/// None of these escape the bridge's public entry points: they are logged
/// and the offending message is dropped.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("{kind} message is missing field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("failed to serialize outbound payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("script delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReflectorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
