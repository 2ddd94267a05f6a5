//! HTTP utilities for inventory REST API calls

use super::auth::Authorization;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
pub fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Status code plus parsed body of a response.
///
/// Bodies that are not JSON are kept as a JSON string so that error
/// classification can still inspect them. An empty body is `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-assigned primary key of the returned object
    pub fn pk(&self) -> Option<u64> {
        self.body.get("pk").and_then(Value::as_u64)
    }

    fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }
}

/// HTTP client wrapper for inventory API calls
#[derive(Clone)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("invseed/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request, returning the status and body whatever the status is
    pub async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        auth: &Authorization,
    ) -> Result<ApiResponse> {
        tracing::debug!("GET {} {:?}", url, query);

        let request = auth.apply(self.client.get(url).query(query));
        self.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: &Value, auth: &Authorization) -> Result<ApiResponse> {
        tracing::debug!("POST {}", url);

        let request = auth.apply(self.client.post(url).json(body));
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !(200..300).contains(&status) {
            // Only log sanitized/truncated error body
            tracing::debug!("API answered {} - {}", status, sanitize_for_log(&text));
        }

        Ok(ApiResponse::from_text(status, &text))
    }
}

/// Short operator-facing explanation of a non-success status
pub fn describe_status(status: u16) -> &'static str {
    match status {
        400 => "invalid request",
        401 => "authentication failed",
        403 => "permission denied",
        404 => "endpoint not found",
        405 => "method not allowed",
        409 => "resource conflict",
        429 => "rate limit exceeded",
        500..=599 => "server error",
        _ => "unexpected response",
    }
}
