//! API-access layer for a database-management console
//!
//! Thin typed clients over the console backend's REST API: each resource
//! family builds business-scoped paths, delegates to a shared HTTP transport
//! and reshapes list envelopes into permission-annotated models.
//!
//! # Module Structure
//!
//! - [`http`] - generic HTTP transport (read / write / blob / remove)
//! - [`client`] - [`ApiClient`](client::ApiClient) with base URL and business context
//! - [`envelope`] - list-envelope shaping and the permission merge
//! - [`params`] - typed request parameters
//! - [`types`] - response types shared across families
//! - [`resource`] - one module per backend resource family
//!
//! # Example
//!
//! ```ignore
//! use dbconsole_api::client::ApiClient;
//! use dbconsole_api::params::ClusterListParams;
//! use dbconsole_api::resource::kafka;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("https://console.example", 3)?;
//!     let clusters = kafka::cluster_list(&client, &ClusterListParams::default()).await?;
//!     for cluster in &clusters.results {
//!         println!("{} {:?}", cluster.domain, cluster.permission);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod envelope;
pub mod http;
pub mod params;
pub mod resource;
pub mod types;

pub use client::ApiClient;
pub use envelope::{merge_permissions, ListResponse, PermissionMap};
