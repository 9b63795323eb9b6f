//! Resource families
//!
//! One module per backend resource family. Each exposes free functions that
//! build the family's namespaced path, delegate to the shared
//! [`ApiClient`](crate::client::ApiClient) and shape the response through
//! the conventions in [`crate::envelope`].
//!
//! - [`kafka`] - Kafka cluster resources (big-data namespace)
//! - [`tendbha`] - MySQL high-availability cluster resources
//! - [`permission`] - password policy and account-rule management

pub mod kafka;
pub mod permission;
pub mod tendbha;
