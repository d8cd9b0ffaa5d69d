use std::error::Error as StdError;

use crate::domain::ValidationError;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`FossBillingClient`](crate::FossBillingClient) and its resources.
///
/// Every failure of a call lands in exactly one variant:
/// - HTTP 401 → [`FossBillingError::Authentication`],
/// - HTTP 404 → [`FossBillingError::NotFound`],
/// - HTTP 422 and local pre-flight checks → [`FossBillingError::Validation`],
/// - any other non-2xx status or a network failure → [`FossBillingError::Api`].
pub enum FossBillingError {
    /// The API key is invalid or lacks the required permissions (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The referenced resource does not exist (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Input was rejected, either locally before sending or by the server (HTTP 422).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Any other non-2xx status, or a transport failure (DNS, refused connection, timeout).
    ///
    /// `status` is `None` when no HTTP response was received.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        body: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A successful response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] TransportError),

    /// The client could not be configured (invalid base URL, HTTP client build failure).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FossBillingError {
    /// HTTP status that caused the error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Validation(ValidationError::Rejected { .. }) => Some(422),
            Self::Api { status, .. } => *status,
            Self::Validation(_) | Self::Decode(_) | Self::Configuration(_) => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
