//! CLI command implementations
//!
//! `serve` wires the configured backend into the HTTP server; the other
//! commands are offline helpers around the same configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use uuid::Uuid;

use super::args::{Command, DEFAULT_CONFIG_PATH};
use super::config::{BackendConfig, Config};
use super::errors::{CliError, CliResult};
use crate::auth::{AuthenticatedUser, JwtSessionProvider, SessionProvider, SessionVerifier};
use crate::backend::{MemoryBackend, MemorySeed, RestBackend, RowStore};
use crate::http_server::HttpServer;
use crate::rest_api::SheetsState;
use crate::sheets::QueryExecutor;

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, dev } => {
            let config = resolve_serve_config(config.as_deref(), dev)?;
            serve(config).await
        }
        Command::CheckConfig { config } => check_config(&config),
        Command::MintToken {
            config,
            sub,
            email,
            ttl_minutes,
        } => mint_token(&config, sub, email, ttl_minutes),
    }
}

/// `--dev` without a config file runs on defaults; otherwise a file is required
fn resolve_serve_config(path: Option<&Path>, dev: bool) -> CliResult<Config> {
    match path {
        Some(path) => Config::load(path),
        None if dev => {
            tracing::warn!("no config given, running with development defaults");
            Ok(Config::default())
        }
        None => Config::load(&PathBuf::from(DEFAULT_CONFIG_PATH)),
    }
}

/// Build the injected services for the configured backend
pub fn build_state(config: &Config) -> CliResult<Arc<SheetsState>> {
    let (store, backend_sessions): (Arc<dyn RowStore>, Arc<dyn SessionProvider>) =
        match &config.backend {
            BackendConfig::Memory { seed_path } => {
                let seed = match seed_path {
                    Some(path) => MemorySeed::load(path)?,
                    None => MemorySeed::default(),
                };
                let backend = Arc::new(MemoryBackend::from_seed(seed));
                tracing::info!(
                    sheets = backend.sheet_count(),
                    sessions = backend.session_count(),
                    "using in-memory backend"
                );
                let store: Arc<dyn RowStore> = backend.clone();
                let sessions: Arc<dyn SessionProvider> = backend;
                (store, sessions)
            }
            BackendConfig::Rest(rest) => {
                let backend = Arc::new(RestBackend::new(rest)?);
                tracing::info!(url = rest.url.as_str(), "using remote backend");
                let store: Arc<dyn RowStore> = backend.clone();
                let sessions: Arc<dyn SessionProvider> = backend;
                (store, sessions)
            }
        };

    let sessions: Arc<dyn SessionProvider> = match &config.auth.jwt {
        Some(jwt) => Arc::new(JwtSessionProvider::new(jwt.clone())),
        None => backend_sessions,
    };

    let verifier = SessionVerifier::new(sessions).with_cookie_name(&config.auth.session_cookie);
    Ok(Arc::new(SheetsState::new(verifier, QueryExecutor::new(store))))
}

/// Start the HTTP server
pub async fn serve(config: Config) -> CliResult<()> {
    let state = build_state(&config)?;
    tracing::info!(
        backend = config.backend.kind(),
        auth = config.auth_mode(),
        "starting sheetdesk"
    );

    HttpServer::new(config.server, state)
        .start()
        .await
        .map_err(|e| CliError::io_error(format!("server failed: {}", e)))
}

/// Printed by `check-config`; never includes secrets
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub listen: String,
    pub backend: &'static str,
    pub auth: &'static str,
    pub session_cookie: String,
    pub cors_origins: Vec<String>,
}

impl From<&Config> for ConfigSummary {
    fn from(config: &Config) -> Self {
        Self {
            listen: config.server.socket_addr(),
            backend: config.backend.kind(),
            auth: config.auth_mode(),
            session_cookie: config.auth.session_cookie.clone(),
            cors_origins: config.server.cors_origins.clone(),
        }
    }
}

/// Validate a config file and print its summary
pub fn check_config(path: &Path) -> CliResult<()> {
    let config = Config::load(path)?;
    println!("{}", serde_json::to_string_pretty(&ConfigSummary::from(&config))?);
    Ok(())
}

/// Issue a signed development token
pub fn issue_dev_token(
    config: &Config,
    sub: Uuid,
    email: Option<String>,
    ttl_minutes: Option<i64>,
) -> CliResult<String> {
    let jwt = config
        .auth
        .jwt
        .clone()
        .ok_or_else(|| CliError::config_error("mint-token requires an auth.jwt section"))?;

    let mut user = AuthenticatedUser::new(sub);
    user.email = email;

    let provider = JwtSessionProvider::new(jwt);
    Ok(provider.issue_token(&user, ttl_minutes.map(Duration::minutes))?)
}

fn mint_token(
    path: &Path,
    sub: Uuid,
    email: Option<String>,
    ttl_minutes: Option<i64>,
) -> CliResult<()> {
    let config = Config::load(path)?;
    println!("{}", issue_dev_token(&config, sub, email, ttl_minutes)?);
    Ok(())
}
