//! Error types for the Haggle client.

use thiserror::Error;

/// Main error type for Haggle operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HaggleError {
    /// The query was empty after trimming whitespace.
    #[error("Query must not be empty")]
    EmptyQuery,

    /// A negotiation request is already in flight.
    #[error("A negotiation request is already in flight")]
    RequestInFlight,

    /// The controller was closed and accepts no more submissions.
    #[error("Controller has been closed")]
    ControllerClosed,

    /// The strength label is not one of the known levels.
    #[error("Unknown negotiation strength: {0}")]
    UnknownStrength(String),

    /// The backend answered with a non-success status.
    #[error("API error: {status}")]
    Status { status: u16 },

    /// The backend could not be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The configured endpoint is not a usable URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The in-flight call was aborted on teardown.
    #[error("Request cancelled")]
    Cancelled,
}

/// Coarse classification of a [`HaggleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Refused locally, nothing was sent.
    Validation,
    /// Network failure or non-success status.
    Transport,
    /// The response body did not match the contract.
    Parse,
    /// Bad client configuration.
    Config,
    /// Aborted by the client.
    Cancelled,
}

impl HaggleError {
    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HaggleError::EmptyQuery
            | HaggleError::RequestInFlight
            | HaggleError::ControllerClosed
            | HaggleError::UnknownStrength(_) => ErrorKind::Validation,
            HaggleError::Status { .. } | HaggleError::ConnectionError(_) => ErrorKind::Transport,
            HaggleError::SerializationError(_) => ErrorKind::Parse,
            HaggleError::InvalidEndpoint(_) => ErrorKind::Config,
            HaggleError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns true if the error was raised before any network call.
    pub fn is_local_refusal(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns the HTTP status if the backend answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HaggleError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience Result type for Haggle operations.
pub type Result<T> = std::result::Result<T, HaggleError>;

impl From<serde_json::Error> for HaggleError {
    fn from(err: serde_json::Error) -> Self {
        HaggleError::SerializationError(err.to_string())
    }
}
