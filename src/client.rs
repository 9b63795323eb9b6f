//! Console API client
//!
//! Combines the HTTP transport with the backend base URL and the business
//! (tenant) context that namespaces almost every resource path. The business
//! id is explicit state on the client rather than ambient process-wide
//! configuration; individual calls may still override it per request.

use crate::http::Transport;
use anyhow::{Context, Result};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Main console API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: Transport,
    base_url: Url,
    biz_id: u64,
}

impl ApiClient {
    /// Create a new client scoped to a backend and a default business id
    pub fn new(base_url: &str, biz_id: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid backend base URL")?;
        let http = Transport::new()?;

        Ok(Self {
            http,
            base_url,
            biz_id,
        })
    }

    /// The default business id this client was constructed with
    pub fn biz_id(&self) -> u64 {
        self.biz_id
    }

    /// Resolve the business id for one request
    ///
    /// An explicit per-call override always wins over the client default.
    pub fn resolve_biz(&self, explicit: Option<u64>) -> u64 {
        explicit.unwrap_or(self.biz_id)
    }

    /// Switch the client to a different business
    pub fn switch_biz(&mut self, biz_id: u64) {
        self.biz_id = biz_id;
    }

    /// Resolve a backend path against the base URL
    pub fn url(&self, path: &str) -> Result<String> {
        let joined = self
            .base_url
            .join(path.trim_start_matches('/'))
            .context("Failed to build request URL")?;
        Ok(joined.to_string())
    }

    /// Make a parameter-encoded read request
    pub async fn read<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value> {
        let url = self.url(path)?;
        self.http.read(&url, params).await
    }

    /// Make a body-encoded write request
    pub async fn write<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.url(path)?;
        self.http.write(&url, body).await
    }

    /// Make a body-encoded write request returning an opaque binary payload
    pub async fn write_blob<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Bytes> {
        let url = self.url(path)?;
        self.http.write_blob(&url, body).await
    }

    /// Make a parameter-encoded delete request
    pub async fn remove<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value> {
        let url = self.url(path)?;
        self.http.remove(&url, params).await
    }

    // =========================================================================
    // Resource path helpers
    // =========================================================================

    /// Build a big-data resource path (Kafka and friends)
    pub fn bigdata_path(&self, biz_id: u64, resource: &str) -> String {
        format!("/apis/bigdata/bizs/{}/{}", biz_id, resource)
    }

    /// Build a MySQL resource path
    pub fn mysql_path(&self, biz_id: u64, resource: &str) -> String {
        format!("/apis/mysql/bizs/{}/{}", biz_id, resource)
    }

    /// Build a global configuration path (not business scoped)
    pub fn conf_path(&self, resource: &str) -> String {
        format!("/apis/conf/{}", resource)
    }
}
