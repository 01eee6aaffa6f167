//! # Session Auth
//!
//! Verifies the caller's session before any sheet query runs. Token
//! validation is delegated to a [`SessionProvider`]: local JWT checks,
//! the remote auth backend, or a fixed table in tests.

pub mod errors;
pub mod jwt;
pub mod session;

pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtSessionProvider};
pub use session::{
    extract_credential, AuthenticatedUser, SessionFuture, SessionProvider, SessionVerifier,
    DEFAULT_SESSION_COOKIE,
};
