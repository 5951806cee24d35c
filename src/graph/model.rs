// src/graph/model.rs

//! Output data model: the visualization graph and its parts.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::graph::ident::pretty_name;
use crate::types::{NodeId, NodeType};

/// Direct dependencies: node id -> ids of the nodes it feeds.
pub type Dependencies = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// A task, dataset or parameters node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeType,
    pub name: String,
    pub full_name: String,
    /// Sorted, without duplicates.
    pub tags: Vec<String>,
    /// Always `None` for tasks.
    pub layer: Option<String>,
    /// Ids of the pipelines the node appears in, sorted.
    pub pipelines: Vec<String>,
}

// Task nodes carry no `layer` key; dataset nodes always do, `null` included.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.kind.is_dataset() { 7 } else { 6 };
        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("full_name", &self.full_name)?;
        state.serialize_field("id", &self.id)?;
        if self.kind.is_dataset() {
            state.serialize_field("layer", &self.layer)?;
        }
        state.serialize_field("name", &self.name)?;
        state.serialize_field("pipelines", &self.pipelines)?;
        state.serialize_field("tags", &self.tags)?;
        state.serialize_field("type", &self.kind)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = pretty_name(&id);
        Self { id, name }
    }
}

/// Reference to a pipeline in the `pipelines` list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PipelineRef {
    pub id: String,
    pub name: String,
}

impl PipelineRef {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = pretty_name(&id);
        Self { id, name }
    }
}

/// The complete output artifact, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Graph {
    pub edges: Vec<Edge>,
    pub layers: Vec<String>,
    pub nodes: Vec<Node>,
    pub pipelines: Vec<PipelineRef>,
    pub selected_pipeline: String,
    pub tags: Vec<Tag>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node whose `full_name` matches.
    pub fn node_by_full_name(&self, full_name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.full_name == full_name)
    }

    pub fn nodes_of_type(&self, kind: NodeType) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}
