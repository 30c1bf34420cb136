use thiserror::Error;

/// Top-level error type for the Positron workspace.
///
/// Context crates (dashboard, portal) define their own error enums and
/// implement `From<PositronError>` where they need to bubble configuration or
/// seed-loading failures up through `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PositronError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PositronError {
    fn from(err: toml::de::Error) -> Self {
        PositronError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PositronError {
    fn from(err: toml::ser::Error) -> Self {
        PositronError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PositronError {
    fn from(err: serde_json::Error) -> Self {
        PositronError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Positron operations.
pub type Result<T> = std::result::Result<T, PositronError>;
