//! Error types for REST API operations

use gemini_auth::AuthError;
use serde_json::Value;
use std::fmt;

use crate::transport::{TransportError, TransportErrorKind};

/// Body of a non-2xx response
///
/// `Structured` when the body parsed as JSON, `Raw` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorDetails {
    /// Parsed JSON error body
    Structured(Value),
    /// Body text that was not valid JSON
    Raw(String),
}

impl ApiErrorDetails {
    /// Classify a response body
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(body.to_string()),
        }
    }

    /// Gemini's machine-readable `reason` field, e.g. `InvalidSignature`
    pub fn reason(&self) -> Option<&str> {
        self.field("reason")
    }

    /// Gemini's human-readable `message` field
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Structured(value) => value.get(name).and_then(Value::as_str),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reason(), self.message()) {
            (Some(reason), Some(message)) => write!(f, "{}: {}", reason, message),
            (Some(text), None) | (None, Some(text)) => f.write_str(text),
            (None, None) => match self {
                Self::Structured(value) => write!(f, "{}", value),
                Self::Raw(text) => f.write_str(text),
            },
        }
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Client could not be constructed from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Exchange answered with a non-2xx status
    #[error("API request failed ({status} {status_text}): {details}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
        /// Parsed or raw response body
        details: ApiErrorDetails,
    },

    /// No response was obtained (timeout, connect, DNS)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Successful response body was not JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Payload could not be signed
    #[error("Signing error: {0}")]
    Auth(#[from] AuthError),
}

impl RestError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured or raw details for API errors
    pub fn details(&self) -> Option<&ApiErrorDetails> {
        match self {
            Self::Api { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Api {
                status, details, ..
            } => *status == 429 || details.reason() == Some("RateLimited"),
            _ => false,
        }
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.kind() == TransportErrorKind::Timeout)
    }

    /// Whether a caller-side retry could plausibly succeed
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500 || self.is_rate_limited(),
            Self::Configuration(_)
            | Self::Parse(_)
            | Self::InvalidParameter(_)
            | Self::Auth(_) => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
