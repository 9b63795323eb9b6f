//! MySQL high-availability cluster resources
//!
//! The tendbha family models master/slave MySQL clusters. Listing comes in
//! two flavours: the regular cluster listing and a slave-entry listing that
//! reuses the same endpoint but surfaces each record under its slave access
//! domain.

use crate::client::ApiClient;
use crate::envelope::{shape_item, shape_list, shape_list_with, ListResponse, PermissionMap};
use crate::params::{
    ClusterListParams, ExportClusterParams, ExportInstanceParams, InstanceListParams,
    InstanceRetrieveParams, NO_PARAMS,
};
use crate::types::{TableField, TopoGraph};
use anyhow::Result;
use bytes::Bytes;
use serde::Deserialize;

const RESOURCE: &str = "tendbha_resources";

/// One MySQL high-availability cluster
#[derive(Debug, Clone, Deserialize)]
pub struct TendbhaCluster {
    pub id: u64,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub master_domain: String,
    #[serde(default)]
    pub slave_domain: String,
    #[serde(default)]
    pub db_module_id: u64,
    #[serde(default)]
    pub db_module_name: String,
    #[serde(default)]
    pub major_version: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// One MySQL instance within a cluster
#[derive(Debug, Clone, Deserialize)]
pub struct TendbhaInstance {
    #[serde(default)]
    pub bk_host_id: u64,
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub instance_address: String,
    #[serde(default)]
    pub cluster_id: u64,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub master_domain: String,
    #[serde(default)]
    pub slave_domain: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// Hardware and placement details for one instance
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TendbhaInstanceDetail {
    #[serde(default)]
    pub bk_host_id: u64,
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub bk_cloud_name: String,
    #[serde(default)]
    pub bk_host_innerip: String,
    #[serde(default)]
    pub bk_cpu: u64,
    #[serde(default)]
    pub bk_mem: u64,
    #[serde(default)]
    pub bk_disk: u64,
    #[serde(default)]
    pub bk_os_name: String,
    #[serde(default)]
    pub bk_idc_name: String,
    #[serde(default)]
    pub idc_city_name: String,
    #[serde(default)]
    pub cluster_id: u64,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub cluster_type_display: String,
    #[serde(default)]
    pub instance_address: String,
    #[serde(default)]
    pub master_domain: String,
    #[serde(default)]
    pub slave_domain: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub db_module_id: u64,
    #[serde(default)]
    pub db_version: String,
    #[serde(default)]
    pub create_at: String,
}

fn root_path(client: &ApiClient, explicit_biz: Option<u64>) -> String {
    client.mysql_path(client.resolve_biz(explicit_biz), RESOURCE)
}

/// List clusters with merged permissions
pub async fn cluster_list(
    client: &ApiClient,
    params: &ClusterListParams,
) -> Result<ListResponse<TendbhaCluster>> {
    let path = format!("{}/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}

/// List clusters keyed by their slave access entry
///
/// Same endpoint as [`cluster_list`]; each record's master domain is
/// replaced by its slave domain before construction so callers can present
/// the slave entry as the primary access point.
pub async fn slave_list(
    client: &ApiClient,
    params: &ClusterListParams,
) -> Result<ListResponse<TendbhaCluster>> {
    let path = format!("{}/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_list_with(raw, |record| {
        if let Some(slave) = record.get("slave_domain").cloned() {
            record.insert("master_domain".to_string(), slave);
        }
    })
}

/// Column descriptors for the cluster listing table
pub async fn table_fields(client: &ApiClient) -> Result<Vec<TableField>> {
    let path = format!("{}/get_table_fields/", root_path(client, None));
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// List MySQL instances
pub async fn instance_list(
    client: &ApiClient,
    params: &InstanceListParams,
) -> Result<ListResponse<TendbhaInstance>> {
    let path = format!("{}/list_instances/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}

/// Fetch hardware and placement details of one instance
pub async fn retrieve_instance(
    client: &ApiClient,
    params: &InstanceRetrieveParams,
) -> Result<TendbhaInstanceDetail> {
    let path = format!("{}/retrieve_instance/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_item(raw)
}

/// Fetch one cluster by id
pub async fn cluster_detail(client: &ApiClient, id: u64) -> Result<TendbhaCluster> {
    let path = format!("{}/{}/", root_path(client, None), id);
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// Fetch the topology graph of a cluster
pub async fn topo_graph(client: &ApiClient, cluster_id: u64) -> Result<TopoGraph> {
    let path = format!("{}/{}/get_topo_graph/", root_path(client, None), cluster_id);
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// Export selected clusters as a file download
pub async fn export_cluster(client: &ApiClient, params: &ExportClusterParams) -> Result<Bytes> {
    let path = format!("{}/export_cluster/", root_path(client, None));
    client.write_blob(&path, params).await
}

/// Export selected instances as a file download
pub async fn export_instance(client: &ApiClient, params: &ExportInstanceParams) -> Result<Bytes> {
    let path = format!("{}/export_instance/", root_path(client, None));
    client.write_blob(&path, params).await
}
