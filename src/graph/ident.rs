// src/graph/ident.rs

//! Node identity and display-name helpers.
//!
//! Node ids are the first 8 hex characters of a BLAKE3 digest of a
//! canonical string: the task repr for tasks, the namespace for datasets.

use crate::types::{NodeId, NodeType};

/// Number of hex characters kept from the digest.
pub const ID_LEN: usize = 8;

/// Short content hash used as a node id.
pub fn hash_id(value: &str) -> NodeId {
    let digest = blake3::hash(value.as_bytes());
    digest.to_hex()[..ID_LEN].to_string()
}

/// Strip a transcoder qualifier: `"cars@spark"` -> `"cars"`.
pub fn namespace_of(dataset: &str) -> &str {
    match dataset.split_once('@') {
        Some((namespace, _transcoder)) => namespace,
        None => dataset,
    }
}

/// A namespace is a parameter node if it mentions `param` anywhere.
pub fn is_parameter(namespace: &str) -> bool {
    namespace.to_lowercase().contains("param")
}

/// Node type for a dataset namespace.
pub fn namespace_type(namespace: &str) -> NodeType {
    if is_parameter(namespace) {
        NodeType::Parameters
    } else {
        NodeType::Data
    }
}

/// Human readable label: `"model_input-table"` -> `"Model Input Table"`.
///
/// Only the first character of each word is uppercased; the rest of the
/// word keeps its casing.
pub fn pretty_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
