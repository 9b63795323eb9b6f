//! Response types shared across resource families

use serde::Deserialize;

/// One column descriptor from a `get_table_fields` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TableField {
    pub key: String,
    pub name: String,
}

/// Cluster topology graph returned by `get_topo_graph` endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopoGraph {
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub nodes: Vec<TopoNode>,
    #[serde(default)]
    pub lines: Vec<TopoLine>,
}

/// One node in a topology graph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopoNode {
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub url: String,
}

/// One directed edge in a topology graph
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopoLine {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_name: String,
}
