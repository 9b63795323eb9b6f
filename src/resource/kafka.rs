//! Kafka cluster resources
//!
//! Functions for listing and inspecting Kafka clusters, their instances,
//! nodes and host machines under the big-data namespace.

use crate::client::ApiClient;
use crate::envelope::{shape_item, shape_list, ListResponse, PermissionMap};
use crate::params::{
    ClusterListParams, ExportClusterParams, ExportInstanceParams, InstanceListParams,
    InstanceRetrieveParams, MachineListParams, NO_PARAMS,
};
use crate::types::{TableField, TopoGraph};
use anyhow::Result;
use bytes::Bytes;
use serde::Deserialize;

const RESOURCE: &str = "kafka/kafka_resources";

/// One Kafka cluster as listed by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaCluster {
    pub id: u64,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub cluster_alias: String,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub domain: String,
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

/// One Kafka broker instance
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaInstance {
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
    pub cluster_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// One node within a Kafka cluster
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaNode {
    #[serde(default)]
    pub bk_host_id: u64,
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub node_count: u64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// One host machine backing Kafka instances
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaMachine {
    #[serde(default)]
    pub bk_host_id: u64,
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub bk_os_name: String,
    #[serde(default)]
    pub bk_city_name: String,
    #[serde(default)]
    pub machine_type: String,
    #[serde(default)]
    pub instance_role: String,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// Access credentials for a Kafka cluster
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KafkaPassword {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub access_url: String,
}

fn root_path(client: &ApiClient, explicit_biz: Option<u64>) -> String {
    client.bigdata_path(client.resolve_biz(explicit_biz), RESOURCE)
}

/// List Kafka clusters with merged permissions
pub async fn cluster_list(
    client: &ApiClient,
    params: &ClusterListParams,
) -> Result<ListResponse<KafkaCluster>> {
    let path = format!("{}/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}

/// Column descriptors for the cluster listing table
pub async fn table_fields(client: &ApiClient) -> Result<Vec<TableField>> {
    let path = format!("{}/get_table_fields/", root_path(client, None));
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// List Kafka broker instances
pub async fn instance_list(
    client: &ApiClient,
    params: &InstanceListParams,
) -> Result<ListResponse<KafkaInstance>> {
    let path = format!("{}/list_instances/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}

/// Fetch one broker instance by address
pub async fn retrieve_instance(
    client: &ApiClient,
    params: &InstanceRetrieveParams,
) -> Result<KafkaInstance> {
    let path = format!("{}/retrieve_instance/", root_path(client, params.bk_biz_id));
    let raw = client.read(&path, params).await?;
    shape_item(raw)
}

/// Fetch one cluster by id
pub async fn cluster_detail(client: &ApiClient, id: u64) -> Result<KafkaCluster> {
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

/// Fetch the access password of a cluster
pub async fn password(client: &ApiClient, cluster_id: u64) -> Result<KafkaPassword> {
    let path = format!("{}/{}/get_password/", root_path(client, None), cluster_id);
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// List the nodes of one cluster
///
/// Sub-resource listing: the path carries the parent cluster id and the
/// permission merge draws on the same list envelope.
pub async fn node_list(
    client: &ApiClient,
    cluster_id: u64,
    params: &InstanceListParams,
) -> Result<ListResponse<KafkaNode>> {
    let path = format!(
        "{}/{}/list_nodes/",
        root_path(client, params.bk_biz_id),
        cluster_id
    );
    let raw = client.read(&path, params).await?;
    shape_list(raw)
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

/// List host machines backing the clusters
pub async fn machine_list(
    client: &ApiClient,
    params: &MachineListParams,
) -> Result<ListResponse<KafkaMachine>> {
    let path = format!("{}/list_machines/", root_path(client, None));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}
