//! # JWT Sessions
//!
//! Stateless validation of HS256 access tokens signed with the project's
//! JWT secret, as issued by the hosted auth backend.
//!
//! ## Invariants
//! - Validation needs no backend round-trip
//! - Issuer, audience and expiry are always checked
//! - `sub` must be a UUID

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::session::{AuthenticatedUser, SessionFuture, SessionProvider};

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    pub aud: String,

    pub iss: String,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared signing secret
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_audience")]
    pub audience: String,

    /// Lifetime of tokens minted by [`JwtSessionProvider::issue_token`]
    #[serde(default = "default_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
}

fn default_issuer() -> String {
    "sheetdesk".to_string()
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_ttl_minutes() -> i64 {
    60
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: default_issuer(),
            audience: default_audience(),
            access_token_ttl_minutes: default_ttl_minutes(),
        }
    }
}

/// Session provider backed by local JWT validation
#[derive(Clone)]
pub struct JwtSessionProvider {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSessionProvider {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint an access token for a user, for local development
    pub fn issue_token(&self, user: &AuthenticatedUser, ttl: Option<Duration>) -> AuthResult<String> {
        let now = Utc::now();
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(self.config.access_token_ttl_minutes));

        let claims = JwtClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Map validated claims to the caller's identity
    pub fn user_from_claims(claims: JwtClaims) -> AuthResult<AuthenticatedUser> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedToken)?;
        Ok(AuthenticatedUser {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl SessionProvider for JwtSessionProvider {
    fn get_user<'a>(&'a self, token: &'a str) -> SessionFuture<'a> {
        Box::pin(async move {
            let claims = self.validate_token(token)?;
            Self::user_from_claims(claims)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider() -> JwtSessionProvider {
        JwtSessionProvider::new(JwtConfig::new("test_secret_key_for_testing_only"))
    }

    fn create_test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(Uuid::new_v4()).with_email("test@example.com")
    }

    #[test]
    fn test_token_round_trip_yields_user() {
        let provider = create_test_provider();
        let user = create_test_user();

        let token = provider.issue_token(&user, None).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = provider.validate_token(&token).unwrap();
        let resolved = JwtSessionProvider::user_from_claims(claims).unwrap();
        assert_eq!(resolved, user);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let provider = create_test_provider();

        let result = provider.validate_token("invalid.token.here");
        assert!(matches!(
            result,
            Err(AuthError::MalformedToken) | Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let provider1 = JwtSessionProvider::new(JwtConfig::new("secret_one"));
        let provider2 = JwtSessionProvider::new(JwtConfig::new("secret_two"));

        let token = provider1.issue_token(&create_test_user(), None).unwrap();
        let result = provider2.validate_token(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let provider = create_test_provider();
        let token = provider
            .issue_token(&create_test_user(), Some(Duration::hours(-1)))
            .unwrap();

        let result = provider.validate_token(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let issuer = JwtSessionProvider::new(JwtConfig {
            audience: "service_role".to_string(),
            ..JwtConfig::new("shared")
        });
        let verifier = JwtSessionProvider::new(JwtConfig::new("shared"));

        let token = issuer.issue_token(&create_test_user(), None).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let claims = JwtClaims {
            sub: "not-a-uuid".to_string(),
            email: None,
            role: None,
            iat: 0,
            exp: 0,
            aud: "authenticated".to_string(),
            iss: "sheetdesk".to_string(),
        };
        assert!(matches!(
            JwtSessionProvider::user_from_claims(claims),
            Err(AuthError::MalformedToken)
        ));
    }

    #[tokio::test]
    async fn test_provider_get_user() {
        let provider = create_test_provider();
        let user = create_test_user();
        let token = provider.issue_token(&user, None).unwrap();

        assert_eq!(provider.get_user(&token).await.unwrap(), user);
        assert!(provider.get_user("garbage").await.is_err());
    }
}
