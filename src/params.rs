//! Typed request parameters
//!
//! Every recognized option is enumerated per operation instead of accepting
//! an open bag of fields. Query-string structs serialize flat; id lists are
//! sent comma-joined the way the backend expects them.

use serde::{Serialize, Serializer};

/// Empty query for endpoints that take no parameters
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// Serialize an optional id list as a comma-joined string ("1,2,3")
pub(crate) fn join_ids<S: Serializer>(
    ids: &Option<Vec<u64>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ids {
        Some(ids) => {
            let joined = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            serializer.serialize_str(&joined)
        }
        None => serializer.serialize_none(),
    }
}

/// Filters for a cluster list request
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterListParams {
    /// Explicit business override; the client default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slave_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_domain: Option<String>,
    #[serde(serialize_with = "join_ids", skip_serializing_if = "Option::is_none")]
    pub cluster_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Filters for an instance list request
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Exclude instances with this role from the listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_exclude: Option<String>,
}

/// Lookup key for a single instance detail request
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceRetrieveParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub instance_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

/// Filters for a machine (host) list request
#[derive(Debug, Clone, Default, Serialize)]
pub struct MachineListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_host_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(serialize_with = "join_ids", skip_serializing_if = "Option::is_none")]
    pub cluster_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_city_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_os_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_cloud_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_role_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
}

/// Selection for a cluster export request (body encoded)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportClusterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_ids: Option<Vec<u64>>,
}

/// Selection for an instance export request (body encoded)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportInstanceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_host_ids: Option<Vec<u64>>,
}
