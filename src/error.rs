//! Error types for report building and submission.

/// Errors raised by the report model, the container and descriptor loading.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A caller-supplied value violates a field contract.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// The container or client is missing required configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A document was requested while required fields are unset.
    #[error("invalid state: {0}")]
    State(String),

    /// The transport failed to deliver a document.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A report descriptor file could not be read or parsed.
    #[error("descriptor error: {0}")]
    Descriptor(String),

    /// A document could not be encoded as JSON.
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures reported by a [`Transport`](crate::ports::Transport) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The connection could not be established or was interrupted.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-success status code.
    #[error("server returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
}

/// Convenience alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;
