//! Error types for authentication operations

/// Errors that can occur while preparing credentials or signing payloads
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required credential was empty
    #[error("Missing credential: {0} must not be empty")]
    MissingCredential(&'static str),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Payload could not be serialized to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
