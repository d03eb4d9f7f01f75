use std::io;
use thiserror::Error;

/// Custom result type for envgate operations
pub type EnvgateResult<T> = Result<T, EnvgateError>;

/// Custom error type for envgate operations
#[derive(Debug, Error)]
pub enum EnvgateError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Transport failure: DNS, connection, or a non-OK HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered but reported failure in its payload
    #[error("Backend error: {0}")]
    Backend(String),

    /// Rejected locally before reaching the network
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl EnvgateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Config(msg.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Network(msg.into())
    }

    /// Create a new backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Backend(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Validation(msg.into())
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Auth(msg.into())
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Storage(msg.into())
    }

    /// Create a new navigation error
    pub fn navigation<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Navigation(msg.into())
    }

    /// Create a new other error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EnvgateError::Other(msg.into())
    }

    /// Text shown in the dialog or banner, without the variant prefix
    pub fn user_message(&self) -> &str {
        match self {
            EnvgateError::Io(msg)
            | EnvgateError::Config(msg)
            | EnvgateError::Serialization(msg)
            | EnvgateError::Network(msg)
            | EnvgateError::Backend(msg)
            | EnvgateError::Validation(msg)
            | EnvgateError::Auth(msg)
            | EnvgateError::Storage(msg)
            | EnvgateError::Navigation(msg)
            | EnvgateError::Other(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for EnvgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EnvgateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for EnvgateError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<io::Error> for EnvgateError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<url::ParseError> for EnvgateError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {}", err))
    }
}
