//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse error classification exposed to the transport layer.
///
/// Maps every domain error onto the user-visible taxonomy: validation
/// failures are surfaced as-is, conflicts mean a duplicate signup,
/// unauthorized means bad credentials or a stale token, forbidden means
/// reuse was detected (and the session revoked as a side effect), and
/// infrastructure failures are retriable 5xx-equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Conflict,
    Unauthorized,
    Forbidden,
    Infrastructure,
}

impl DomainError {
    /// Classify this error per the user-visible taxonomy
    pub fn classification(&self) -> ErrorClass {
        match self {
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                ErrorClass::Validation
            }
            DomainError::Infrastructure { .. } => ErrorClass::Infrastructure,
            DomainError::Auth(AuthError::EmailAlreadyRegistered) => ErrorClass::Conflict,
            DomainError::Auth(_) => ErrorClass::Unauthorized,
            DomainError::Token(TokenError::TokenReuseDetected) => ErrorClass::Forbidden,
            DomainError::Token(
                TokenError::TokenGenerationFailed
                | TokenError::KeyGenerationFailed { .. }
                | TokenError::KeyLoadError { .. },
            ) => ErrorClass::Infrastructure,
            DomainError::Token(_) => ErrorClass::Unauthorized,
        }
    }
}
