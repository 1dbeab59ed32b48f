//! Error types for ip2provider

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// An unknown provider was requested, or the provider table itself is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A raw feed payload is structurally invalid for its expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No stored ranges for provider '{0}'")]
    NotFound(String),

    #[error("Stored ranges for provider '{provider}' are corrupt: {reason}")]
    CorruptData { provider: String, reason: String },

    /// A single range entry could not be read as a CIDR block. Never fatal.
    #[error("Malformed range entry '{0}'")]
    MalformedEntry(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// `true` for provider-level data problems that classification treats as "no match".
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::CorruptData { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
