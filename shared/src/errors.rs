//! Error types for credential and session-token handling

use thiserror::Error;

/// Authentication error types
///
/// Messages are deliberately information-minimal: they are sent to clients
/// verbatim and must not reveal which half of a credential pair was wrong.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,
}

impl AuthError {
    /// Stable machine-readable code used in error response bodies
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateUser => "DUPLICATE_USER",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::ExpiredToken => "EXPIRED_TOKEN",
        }
    }
}
