//! Inventory API Client
//!
//! Session combining the HTTP client, the base URL and whatever
//! authentication was negotiated with the server.

use super::auth::{self, AuthMode, Authorization, Credentials};
use super::http::{ApiHttpClient, ApiResponse};
use crate::config::ApiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Request surface the seeders need from the remote API.
///
/// Paths are relative to the API base URL (`part/category/`). Any response
/// that arrives is returned with its status; only transport failures are
/// errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse>;

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

/// Authenticated session against one inventory instance
#[derive(Clone)]
pub struct ApiSession {
    http: ApiHttpClient,
    base_url: Url,
    credentials: Credentials,
    authorization: Authorization,
    mode: AuthMode,
}

impl ApiSession {
    /// Create a session. Requests carry the basic credentials until
    /// [`ApiSession::authenticate`] decides otherwise.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API base URL: {}", config.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("API base URL must be http or https: {}", config.base_url);
        }

        let http = ApiHttpClient::new(Duration::from_secs(config.timeout_secs))?;
        let credentials = Credentials::new(&config.username, &config.password);

        Ok(Self {
            http,
            base_url,
            authorization: Authorization::Basic(credentials.clone()),
            credentials,
            mode: AuthMode::Basic,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.mode
    }

    /// Build a full URL from an API-relative path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Negotiate authentication: token first, then basic, then guest.
    ///
    /// Only the token path mutates the outgoing headers; a guest session
    /// stops sending credentials at all.
    pub async fn authenticate(&mut self) -> AuthMode {
        let token_url = self.url(auth::TOKEN_PATH);
        match auth::fetch_token(&self.http, &token_url, &self.credentials).await {
            Ok(Some(token)) => {
                tracing::info!("Authenticated with API token");
                self.authorization = Authorization::Token(token);
                self.mode = AuthMode::Token;
                return self.mode;
            }
            Ok(None) => tracing::warn!("API token not available, trying basic auth"),
            Err(e) => tracing::warn!("Token request failed: {:#}", e),
        }

        let me_url = self.url(auth::CURRENT_USER_PATH);
        match auth::verify_basic(&self.http, &me_url, &self.credentials).await {
            Ok(true) => {
                tracing::info!("Authenticated with basic auth");
                self.authorization = Authorization::Basic(self.credentials.clone());
                self.mode = AuthMode::Basic;
            }
            Ok(false) => {
                tracing::error!("Credentials rejected for user '{}'", self.credentials.username);
                self.authorization = Authorization::None;
                self.mode = AuthMode::Guest;
            }
            Err(e) => {
                tracing::error!("Basic auth check failed: {:#}", e);
                self.authorization = Authorization::None;
                self.mode = AuthMode::Guest;
            }
        }

        self.mode
    }
}

#[async_trait]
impl Transport for ApiSession {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        self.http.get(&self.url(path), query, &self.authorization).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.http.post(&self.url(path), body, &self.authorization).await
    }
}
