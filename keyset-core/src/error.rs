//! Error types for key set core
//!
//! Taxonomy shared by the projection layer and the controller.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Key set errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provider fetch failure, carries the provider's own description
    #[error("{0}")]
    Fetch(String),

    /// Two derived keys share a derivation path
    #[error("Duplicate derivation path: {0}")]
    DuplicatePath(String),

    /// SS58 prefix outside the encodable range
    #[error("Invalid address prefix: {0}")]
    InvalidPrefix(u16),

    /// Public key bytes cannot be encoded
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Check if the error is recoverable by re-triggering a refresh
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Fetch(_) | Error::Io(_))
    }

    /// Message shown in the error alert
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Fetch(_) => ErrorCategory::Provider,
            Error::DuplicatePath(_) => ErrorCategory::KeySet,
            Error::InvalidPrefix(_) | Error::InvalidPublicKey(_) => ErrorCategory::Encoding,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io(_) | Error::Serialization(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External provider failures
    Provider,
    /// Key set invariant violations
    KeySet,
    /// Address encoding failures
    Encoding,
    /// Configuration failures
    Config,
    /// Internal/system errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Provider => write!(f, "Provider"),
            ErrorCategory::KeySet => write!(f, "KeySet"),
            ErrorCategory::Encoding => write!(f, "Encoding"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}
