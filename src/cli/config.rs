//! Configuration file structure
//!
//! JSON file with three sections: `server`, `auth` and `backend`. Every
//! field has a default except the secrets of the remote backend and of
//! JWT validation, which must be given when those sections are used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::auth::{JwtConfig, DEFAULT_SESSION_COOKIE};
use crate::backend::RestBackendConfig;
use crate::http_server::HttpServerConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

/// Session verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Cookie carrying the access token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Validate tokens locally instead of asking the backend
    #[serde(default)]
    pub jwt: Option<JwtConfig>,
}

fn default_session_cookie() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            jwt: None,
        }
    }
}

/// Which backend serves sessions and rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-process store, optionally seeded from a JSON file
    Memory {
        #[serde(default)]
        seed_path: Option<PathBuf>,
    },

    /// Hosted PostgREST-style backend
    Rest(RestBackendConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Memory { seed_path: None }
    }
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory { .. } => "memory",
            Self::Rest(_) => "rest",
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values that would only fail later, at request time
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        if self.auth.session_cookie.trim().is_empty() {
            return Err(CliError::config_error("auth.session_cookie must not be empty"));
        }

        if let Some(jwt) = &self.auth.jwt {
            if jwt.secret.is_empty() {
                return Err(CliError::config_error("auth.jwt.secret must not be empty"));
            }
        }

        if let BackendConfig::Rest(rest) = &self.backend {
            if rest.url.trim().is_empty() {
                return Err(CliError::config_error("backend.url must not be empty"));
            }
            if !rest.url.starts_with("http://") && !rest.url.starts_with("https://") {
                return Err(CliError::config_error(format!(
                    "backend.url must be an http(s) URL, got '{}'",
                    rest.url
                )));
            }
            if rest.api_key.is_empty() {
                return Err(CliError::config_error("backend.api_key must not be empty"));
            }
            if rest.timeout_secs == 0 {
                return Err(CliError::config_error("backend.timeout_secs must be > 0"));
            }
        }

        Ok(())
    }

    /// Session verification mode, for display
    pub fn auth_mode(&self) -> &'static str {
        if self.auth.jwt.is_some() {
            "jwt"
        } else {
            "backend"
        }
    }
}
