//! # Auth Errors
//!
//! Error types for session verification. None of these reach a caller:
//! the verifier collapses every failure into an authentication failure.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Session verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Credential Errors
    // ==================

    /// Neither a bearer token nor a session cookie was supplied
    #[error("No session credential supplied")]
    MissingCredentials,

    /// Session not found or expired
    #[error("Session expired or invalid")]
    SessionInvalid,

    // ==================
    // JWT Errors
    // ==================

    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    // ==================
    // Provider Errors
    // ==================

    /// The session provider could not be reached or answered badly
    #[error("Session provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken => 400,

            AuthError::MissingCredentials => 401,
            AuthError::SessionInvalid => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,

            AuthError::TokenGenerationFailed => 500,
            AuthError::Provider(_) => 500,
        }
    }

    /// Returns whether the caller, rather than the provider, is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::MissingCredentials.status_code(), 401);
        assert_eq!(AuthError::MalformedToken.status_code(), 400);
        assert_eq!(AuthError::Provider("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_provider_errors_are_not_client_errors() {
        assert!(AuthError::TokenExpired.is_client_error());
        assert!(!AuthError::Provider("timeout".to_string()).is_client_error());
    }
}
