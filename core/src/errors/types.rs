//! Domain-specific error types for authentication and session operations
//!
//! Error messages here are the canonical English ones; presentation
//! concerns (status codes, localization) belong to the transport layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Shop already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid request - session not found")]
    SessionNotFound,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token reuse detected - session terminated")]
    TokenReuseDetected,

    #[error("Refresh token rotation conflict")]
    RotationConflict,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Key pair generation failed: {message}")]
    KeyGenerationFailed { message: String },

    #[error("Key material could not be loaded: {message}")]
    KeyLoadError { message: String },
}

/// Input validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid length for field: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },
}
