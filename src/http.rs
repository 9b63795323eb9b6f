//! HTTP utilities for backend REST API calls
//!
//! The transport is deliberately generic: it knows nothing about resource
//! paths or payload shapes, it only encodes parameters, sends requests and
//! hands back decoded JSON (or raw bytes for blob responses).

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and masks potentially sensitive patterns
fn sanitize_for_log(body: &str) -> String {
    // Truncate long responses, backing up to a char boundary so multibyte
    // bodies (localized backend errors) cannot split a character
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for the console backend
#[derive(Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Create a new HTTP transport
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("dbconsole-api/0.2.1")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a parameter-encoded GET request
    pub async fn read<P: Serialize + ?Sized>(&self, url: &str, params: &P) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }

    /// Make a body-encoded POST request expecting a JSON response
    pub async fn write<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        // Handle empty response
        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_body).context("Failed to parse response JSON")
    }

    /// Make a body-encoded POST request expecting an opaque binary response
    ///
    /// Used for file exports. The payload is returned byte-for-byte; no JSON
    /// decoding is ever attempted on it.
    pub async fn write_blob<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Bytes> {
        tracing::debug!("POST {} (blob)", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        response
            .bytes()
            .await
            .context("Failed to read response payload")
    }

    /// Make a parameter-encoded DELETE request
    pub async fn remove<P: Serialize + ?Sized>(&self, url: &str, params: &P) -> Result<Value> {
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .query(params)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP transport")
    }
}

/// Format a backend API error for display
/// Sanitizes error messages to avoid leaking sensitive API details
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    if error_str.contains("403") {
        return "Permission denied. Check your console access rights.".to_string();
    }
    if error_str.contains("401") {
        return "Authentication failed. Sign in to the console again.".to_string();
    }
    if error_str.contains("404") {
        return "Resource not found.".to_string();
    }
    if error_str.contains("429") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if error_str.contains("400") {
        return "Invalid request. Check your parameters.".to_string();
    }
    if error_str.contains("500") || error_str.contains("503") {
        return "Backend service temporarily unavailable. Please try again.".to_string();
    }
    if error_str.contains("409") {
        return "Resource conflict. The resource may already exist or be in use.".to_string();
    }

    if error_str.contains("API request failed") {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    // Truncate long error messages and remove potential sensitive data
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
