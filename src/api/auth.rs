//! Inventory API Authentication
//!
//! Obtains an API token with the admin credentials, falling back to HTTP
//! basic authentication, and finally to unauthenticated guest access.

use super::http::{ApiHttpClient, ApiResponse};
use anyhow::Result;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

/// Token-issue endpoint (basic credentials in, `{"token": ...}` out)
pub const TOKEN_PATH: &str = "user/token/";

/// Current-user endpoint used to verify basic credentials
pub const CURRENT_USER_PATH: &str = "user/me/";

/// Admin username/password pair
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// What gets attached to an outgoing request
#[derive(Clone)]
pub enum Authorization {
    None,
    Basic(Credentials),
    Token(String),
}

impl Authorization {
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Authorization::None => request,
            Authorization::Basic(creds) => {
                request.basic_auth(&creds.username, Some(&creds.password))
            }
            Authorization::Token(token) => {
                request.header(reqwest::header::AUTHORIZATION, format!("Token {}", token))
            }
        }
    }
}

/// How the session ended up authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `Authorization: Token ...` on every request
    Token,
    /// HTTP basic credentials on every request
    Basic,
    /// No usable credentials; requests go out anonymously
    Guest,
}

impl AuthMode {
    pub fn is_degraded(self) -> bool {
        self == AuthMode::Guest
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Token => "token",
            AuthMode::Basic => "basic",
            AuthMode::Guest => "guest",
        }
    }
}

/// Pull a non-empty token out of a token-endpoint response
fn token_from_response(response: &ApiResponse) -> Option<String> {
    if response.status != 200 {
        return None;
    }
    response
        .body
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Request an API token with basic credentials.
///
/// Returns `Ok(None)` when the endpoint answers but hands out no token.
pub async fn fetch_token(
    http: &ApiHttpClient,
    url: &str,
    creds: &Credentials,
) -> Result<Option<String>> {
    let response = http
        .get(url, &[], &Authorization::Basic(creds.clone()))
        .await?;
    if response.status != 200 {
        tracing::debug!("Token endpoint answered {}", response.status);
    }
    Ok(token_from_response(&response))
}

/// Check that basic credentials are accepted by the current-user endpoint
pub async fn verify_basic(http: &ApiHttpClient, url: &str, creds: &Credentials) -> Result<bool> {
    let response = http
        .get(url, &[], &Authorization::Basic(creds.clone()))
        .await?;
    Ok(response.status == 200)
}
