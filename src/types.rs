use serde::{Deserialize, Serialize};

/// Content-derived node identifier (8 lowercase hex characters).
pub type NodeId = String;

/// Kind of a node in the visualization graph.
///
/// Serialized as the lowercase `type` field of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A pipeline task (a function application).
    Task,
    /// A dataset namespace.
    Data,
    /// A dataset namespace holding parameters (`parameters`, `params:*`).
    Parameters,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Task => "task",
            NodeType::Data => "data",
            NodeType::Parameters => "parameters",
        }
    }

    /// Whether nodes of this type may carry a layer.
    pub fn is_dataset(&self) -> bool {
        !matches!(self, NodeType::Task)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline id used when a project does not name its pipelines.
pub const DEFAULT_PIPELINE: &str = "__default__";
