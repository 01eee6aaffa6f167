//! # Session Verification
//!
//! Gate in front of every sheet query. The credential is taken from the
//! `Authorization: Bearer` header, falling back to the session cookie,
//! and checked against a [`SessionProvider`].
//!
//! ## Invariants
//! - Fails closed: provider errors are treated exactly like "no session"
//! - No side effects on success or failure

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::AuthResult;
use crate::sheets::SheetError;

/// Default name of the cookie carrying the access token
pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";

/// The caller's identity, resolved once per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            email: None,
            role: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Boxed future returned by session lookups
pub type SessionFuture<'a> = Pin<Box<dyn Future<Output = AuthResult<AuthenticatedUser>> + Send + 'a>>;

/// The `getUser` side of the auth backend
pub trait SessionProvider: Send + Sync {
    /// Resolve an access token to its user, or fail
    fn get_user<'a>(&'a self, token: &'a str) -> SessionFuture<'a>;
}

/// Pull the access token out of the request headers.
///
/// A bearer token wins over the cookie. The scheme name is matched
/// case-insensitively.
pub fn extract_credential<'h>(headers: &'h HeaderMap, cookie_name: &str) -> Option<&'h str> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some((scheme, token)) = auth.trim_start().split_once(' ') {
            let token = token.trim();
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
                return Some(token);
            }
        }
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value)
}

/// Verifies the caller's session before any data operation
#[derive(Clone)]
pub struct SessionVerifier {
    provider: Arc<dyn SessionProvider>,
    cookie_name: String,
}

impl SessionVerifier {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Verify the request's session.
    ///
    /// Every failure, including provider outages, becomes
    /// [`SheetError::Unauthenticated`].
    pub async fn verify(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, SheetError> {
        let Some(token) = extract_credential(headers, &self.cookie_name) else {
            tracing::debug!("request carries no session credential");
            return Err(SheetError::Unauthenticated);
        };

        match self.provider.get_user(token).await {
            Ok(user) => Ok(user),
            Err(err) if err.is_client_error() => {
                tracing::debug!(error = %err, "session rejected");
                Err(SheetError::Unauthenticated)
            }
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed, denying request");
                Err(SheetError::Unauthenticated)
            }
        }
    }
}
