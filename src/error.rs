//! Error types of the store adapter and the request dispatcher.

use thiserror::Error;

/// Boxed error raised by a storage backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of an item store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A create found an item under the same key.
    #[error("item already exists")]
    AlreadyExists,
    /// An update or delete found no item under the key.
    #[error("item not found")]
    NotFound,
    /// The backend failed for any other reason.
    #[error("storage operation failed: {0}")]
    Storage(#[source] BoxError),
    /// A record could not be converted to its tagged form.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_dynamo::Error),
}

impl StoreError {
    /// Wrap a backend failure.
    pub fn storage(error: impl Into<BoxError>) -> Self {
        Self::Storage(error.into())
    }
}

/// Client-visible failure of a request, rendered as an `{"error": ...}` body.
///
/// ```rust
/// use gearbox_catalog::error::ApiError;
///
/// let error = ApiError::MethodNotAllowed("PUT".to_string());
/// assert_eq!(error.status_code(), 405);
/// assert_eq!(error.to_string(), "Method PUT not allowed");
/// ```
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ApiError {
    /// Malformed or incomplete input.
    #[error("{0}")]
    BadRequest(String),
    /// The targeted item does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The item to create already exists.
    #[error("{0}")]
    Conflict(String),
    /// The HTTP method is not served.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
    /// Storage or unclassified failure; the message never carries internals.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code of the error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
