//! Listed-response shaping
//!
//! The backend attaches authorization decisions at two granularities:
//! collection-wide defaults on the list envelope and per-item overrides on
//! individual records. Every list endpoint in this crate funnels through
//! [`shape_list`], which resolves the two into one flat permission mapping
//! per item so callers never have to distinguish inherited from own flags.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Permission-name to granted mapping for a resource or item
pub type PermissionMap = BTreeMap<String, bool>;

/// List envelope returned by every paginated backend endpoint
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    /// Total items available server-side (not the page size)
    pub count: u64,
    /// Collection-level permission defaults from the envelope
    pub permission: PermissionMap,
    /// One shaped model per raw record, backend order preserved
    pub results: Vec<T>,
}

/// Raw envelope as the backend sends it, before shaping
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    permission: PermissionMap,
    #[serde(default)]
    results: Vec<Value>,
}

/// Merge collection-level defaults with an item's own flags
///
/// Item flags win on conflicting keys; keys present only on the item pass
/// through unchanged. The result is a freshly allocated map, so shaped items
/// never alias each other or the envelope.
pub fn merge_permissions(envelope: &PermissionMap, item: &PermissionMap) -> PermissionMap {
    let mut merged = envelope.clone();
    for (name, granted) in item {
        merged.insert(name.clone(), *granted);
    }
    merged
}

/// Shape a raw list envelope into typed models
///
/// Each record gets the merged permission mapping injected before
/// construction. All-or-nothing: the first record that fails typed
/// construction fails the whole call.
pub fn shape_list<M: DeserializeOwned>(raw: Value) -> Result<ListResponse<M>> {
    shape_list_with(raw, |_| {})
}

/// Shape a raw list envelope, applying a record fixup before construction
///
/// The fixup runs after the permission merge and may rename or default
/// fields on the record (e.g. the slave-entry listing substituting the
/// slave domain for the master domain).
pub fn shape_list_with<M, F>(raw: Value, mut fixup: F) -> Result<ListResponse<M>>
where
    M: DeserializeOwned,
    F: FnMut(&mut Map<String, Value>),
{
    let envelope: RawEnvelope =
        serde_json::from_value(raw).context("Failed to decode list envelope")?;

    let mut results = Vec::with_capacity(envelope.results.len());
    for item in envelope.results {
        let mut record = match item {
            Value::Object(map) => map,
            other => {
                return Err(anyhow::anyhow!(
                    "List record is not an object: {}",
                    other
                ))
            }
        };

        let own: PermissionMap = match record.remove("permission") {
            Some(value) => {
                serde_json::from_value(value).context("Failed to decode item permission")?
            }
            None => PermissionMap::new(),
        };
        let merged = merge_permissions(&envelope.permission, &own);
        record.insert(
            "permission".to_string(),
            serde_json::to_value(&merged).context("Failed to encode merged permission")?,
        );

        fixup(&mut record);

        let model = serde_json::from_value(Value::Object(record))
            .context("Failed to construct model from list record")?;
        results.push(model);
    }

    Ok(ListResponse {
        count: envelope.count,
        permission: envelope.permission,
        results,
    })
}

/// Shape a single raw record into a typed model
///
/// Detail endpoints return one record with no envelope, so there is no
/// permission merge beyond what the backend already resolved for the item.
pub fn shape_item<M: DeserializeOwned>(raw: Value) -> Result<M> {
    serde_json::from_value(raw).context("Failed to construct model from record")
}
