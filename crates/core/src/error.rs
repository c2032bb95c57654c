//! Error types for the agent tools.

use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the agent tools.
///
/// Public tool operations never return this directly; it is folded into the
/// operation's result envelope at the boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Input document does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// I/O error other than a missing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document was valid JSON but had the wrong shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("{0}")]
    Config(String),

    /// Unusable call arguments.
    #[error("{0}")]
    InvalidInput(String),

    /// Transport failure talking to a remote endpoint.
    #[error("{0}")]
    Network(String),

    /// Remote endpoint answered with a failure.
    #[error("{message}")]
    Api {
        message: String,
        status_code: Option<u16>,
        request_url: Option<String>,
    },

    /// Lookup miss.
    #[error("{0}")]
    NotFound(String),

    /// Statistics could not be computed.
    #[error("{0}")]
    Analysis(String),
}

impl Error {
    /// Map an I/O error raised while reading `path`.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.display().to_string())
        } else {
            Error::Io(err)
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    /// Create an API-level error (HTTP success, failure in the body).
    pub fn api(msg: impl Into<String>) -> Self {
        Error::Api {
            message: msg.into(),
            status_code: None,
            request_url: None,
        }
    }

    /// Create an HTTP-level error.
    pub fn http(msg: impl Into<String>, status_code: u16, request_url: impl Into<String>) -> Self {
        Error::Api {
            message: msg.into(),
            status_code: Some(status_code),
            request_url: Some(request_url.into()),
        }
    }

    /// Create a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an analysis error.
    pub fn analysis(msg: impl Into<String>) -> Self {
        Error::Analysis(msg.into())
    }
}
