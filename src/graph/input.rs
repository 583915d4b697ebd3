//! Serde shapes for graph and tree input data.
//!
//! Graphs arrive as `{nodes: [{id, x, y}], edges: [{source, target, weight}]}`;
//! edges are undirected. Trees list each node with optional `left`/`right`
//! child ids.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Display label, e.g. a road name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<NodeInput>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
}

impl GraphInput {
    pub fn node(mut self, id: &str, x: f64, y: f64) -> Self {
        self.nodes.push(NodeInput {
            id: id.to_string(),
            x,
            y,
        });
        self
    }

    pub fn edge(mut self, source: &str, target: &str, weight: f64) -> Self {
        self.edges.push(EdgeInput {
            source: source.to_string(),
            target: target.to_string(),
            weight,
            name: None,
        });
        self
    }

    pub fn named_edge(mut self, source: &str, target: &str, weight: f64, name: &str) -> Self {
        self.edges.push(EdgeInput {
            source: source.to_string(),
            target: target.to_string(),
            weight,
            name: Some(name.to_string()),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeInput {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeInput {
    pub nodes: Vec<TreeNodeInput>,
    /// Defaults to the first listed node
    #[serde(default)]
    pub root: Option<String>,
}
