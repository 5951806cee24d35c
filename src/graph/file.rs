// src/graph/file.rs

//! JSON form of the graph.
//!
//! Output is canonical: object keys sorted, 4-space indentation, so the same
//! pipeline always produces the same bytes.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::errors::{PipevizError, Result};
use crate::fs::FileSystem;
use crate::graph::model::Graph;

/// Top-level keys a pre-built graph file must have, checked in this order.
pub const REQUIRED_KEYS: [&str; 3] = ["nodes", "edges", "tags"];

/// Serialize `graph` to canonical JSON.
pub fn to_canonical_json(graph: &Graph) -> Result<String> {
    // Going through `Value` sorts every object's keys.
    let value = serde_json::to_value(graph)?;

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    let json = String::from_utf8(buf).map_err(anyhow::Error::from)?;
    Ok(json)
}

/// Check that a pre-built graph document has every required top-level key.
pub fn validate_graph_value(value: &Value) -> Result<()> {
    let Some(object) = value.as_object() else {
        return Err(PipevizError::InvalidGraphFile {
            key: REQUIRED_KEYS[0].to_string(),
        });
    };

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(PipevizError::InvalidGraphFile {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse and validate a pre-built graph document.
pub fn parse_graph_json(contents: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(contents)?;
    validate_graph_value(&value)?;
    Ok(value)
}

/// Load a pre-built graph file. The document is returned as-is.
pub fn load_graph_file(fs: &dyn FileSystem, path: &Path) -> Result<Value> {
    let contents = fs.read_to_string(path)?;
    let value = parse_graph_json(&contents)?;
    debug!(path = ?path, "loaded pre-built graph file");
    Ok(value)
}

/// Write `graph` as canonical JSON to `path`.
pub fn write_graph_file(fs: &dyn FileSystem, path: &Path, graph: &Graph) -> Result<()> {
    let json = to_canonical_json(graph)?;
    fs.write(path, json.as_bytes())?;
    info!(
        path = ?path,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "wrote pipeline graph"
    );
    Ok(())
}
