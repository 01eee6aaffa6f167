//! # Remote Backend Client
//!
//! Talks to a hosted PostgREST-style backend:
//!
//! - `GET  {url}/auth/v1/user` resolves an access token to its user
//! - `POST {url}/rest/v1/rpc/search_sheet_data` runs a sheet search
//! - `POST {url}/rest/v1/rpc/get_sheet_stats` aggregates a sheet
//!
//! Every request carries the project `apikey`. No request is retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{BackendError, BackendFuture, BackendResult, RowStore};
use crate::auth::{AuthError, AuthResult, AuthenticatedUser, SessionFuture, SessionProvider};
use crate::sheets::{DatasetHandle, Row, SearchQuery, SheetStats};

const SEARCH_RPC: &str = "search_sheet_data";
const STATS_RPC: &str = "get_sheet_stats";

/// Remote backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestBackendConfig {
    /// Project base URL, e.g. `https://project.example.co`
    pub url: String,

    /// Project API key sent as the `apikey` header
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl RestBackendConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP client for the hosted backend
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: &RestBackendConfig) -> BackendResult<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| BackendError::Decode("api key is not a valid header value".to_string()))?;
        headers.insert("apikey", api_key);

        let http = reqwest::Client::builder()
            .user_agent(concat!("sheetdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of a remote procedure
    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// URL of the current-user endpoint
    pub fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    async fn call_rpc(&self, function: &str, body: Value) -> BackendResult<Value> {
        let resp = self
            .http
            .post(self.rpc_url(function))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn fetch_user(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let resp = self
            .http
            .get(self.user_url())
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(AuthError::SessionInvalid);
        }
        if !status.is_success() {
            return Err(AuthError::Provider(format!("user lookup returned {}", status)));
        }

        resp.json::<AuthenticatedUser>()
            .await
            .map_err(|e| AuthError::Provider(format!("malformed user payload: {}", e)))
    }
}

/// Body of the search procedure call
pub fn search_body(dataset: &DatasetHandle, query: &SearchQuery) -> Value {
    let filters: serde_json::Map<String, Value> = query
        .effective_filters()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    json!({
        "p_sheet_id": dataset.sheet_id(),
        "p_search_term": query.effective_term().unwrap_or(""),
        "p_column_filters": filters,
    })
}

/// Body of the stats procedure call
pub fn stats_body(dataset: &DatasetHandle) -> Value {
    json!({ "p_sheet_id": dataset.sheet_id() })
}

/// Decode the search procedure's row array
pub fn decode_rows(payload: Value) -> BackendResult<Vec<Row>> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Row::try_from(item).map_err(BackendError::Decode))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(BackendError::Decode(format!(
            "expected an array of rows, got {}",
            other
        ))),
    }
}

/// Decode the stats procedure's result set; empty means no aggregate
pub fn decode_stats(payload: Value) -> BackendResult<Option<SheetStats>> {
    let first = match payload {
        Value::Array(items) => items.into_iter().next(),
        Value::Null => None,
        object @ Value::Object(_) => Some(object),
        other => {
            return Err(BackendError::Decode(format!(
                "expected stats object or array, got {}",
                other
            )))
        }
    };

    match first {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| BackendError::Decode(format!("malformed stats: {}", e))),
    }
}

/// Map non-success responses to [`BackendError::Api`]
async fn check_response(resp: reqwest::Response) -> BackendResult<reqwest::Response> {
    if !resp.status().is_success() {
        return Err(BackendError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

impl RowStore for RestBackend {
    fn search_rows<'a>(
        &'a self,
        dataset: &'a DatasetHandle,
        query: &'a SearchQuery,
    ) -> BackendFuture<'a, Vec<Row>> {
        Box::pin(async move {
            let payload = self.call_rpc(SEARCH_RPC, search_body(dataset, query)).await?;
            decode_rows(payload)
        })
    }

    fn aggregate<'a>(&'a self, dataset: &'a DatasetHandle) -> BackendFuture<'a, Option<SheetStats>> {
        Box::pin(async move {
            let payload = self.call_rpc(STATS_RPC, stats_body(dataset)).await?;
            decode_stats(payload)
        })
    }
}

impl SessionProvider for RestBackend {
    fn get_user<'a>(&'a self, token: &'a str) -> SessionFuture<'a> {
        Box::pin(self.fetch_user(token))
    }
}
