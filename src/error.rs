use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Backend request failed: {0}")]
    #[diagnostic(code(kyomu::transport))]
    Transport(String),

    #[error("{0}")]
    #[diagnostic(code(kyomu::precondition))]
    Precondition(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(kyomu::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(kyomu::config))]
    Config(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(kyomu::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(kyomu::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(kyomu::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(kyomu::other))]
    Other(String),
}

impl Error {
    /// Whether the failure came from the backend rather than local state
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether the operation was refused before any request went out
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type DeskResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create transport errors
pub fn transport_error(message: &str) -> Error {
    Error::Transport(message.to_string())
}

/// Helper to create precondition errors
pub fn precondition_error(message: &str) -> Error {
    Error::Precondition(message.to_string())
}
