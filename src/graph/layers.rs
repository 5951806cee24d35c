// src/graph/layers.rs

//! Layer ordering.
//!
//! A layer must come before another layer whenever some node in the first is
//! a (possibly indirect) dependency of some node in the second. Example:
//!
//! ```text
//! node1(layer=a) -> node2 -> node4 -> node6(layer=d)
//!                     |                   ^
//!                     v                   |
//!                   node3(layer=b) -> node5(layer=c)
//! ```
//!
//! gives `[a, b, c, d]`.
//!
//! This is a transitive closure followed by a topological sort:
//! - for every node, collect the layers reachable through its descendants
//!   (memoized, so each node is expanded once);
//! - turn that into a `parent layer -> child layer` relation;
//! - sort the relation level by level, alphabetically within a level.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{PipevizError, Result};
use crate::graph::model::{Dependencies, Node};

/// Layers of `nodes` in dependency order.
///
/// `dependencies` maps a node id to the ids of the nodes it directly feeds.
/// Fails with [`PipevizError::CircularLayerDependency`] when two or more
/// layers depend on each other. A layer depending on itself is fine.
pub fn sort_layers(nodes: &[Node], dependencies: &Dependencies) -> Result<Vec<String>> {
    let own_layer: HashMap<&str, &str> = nodes
        .iter()
        .filter_map(|n| n.layer.as_deref().map(|layer| (n.id.as_str(), layer)))
        .collect();

    if own_layer.is_empty() {
        return Ok(Vec::new());
    }

    let reachable = reachable_layers(nodes, dependencies, &own_layer);

    let mut relation: DiGraphMap<&str, ()> = DiGraphMap::new();
    for layer in own_layer.values() {
        relation.add_node(*layer);
    }
    for (node_id, child_layers) in reachable.iter() {
        let Some(parent) = own_layer.get(node_id) else {
            continue;
        };
        for child in child_layers.iter() {
            if child != parent {
                relation.add_edge(*parent, *child, ());
            }
        }
    }

    debug!(
        layers = relation.node_count(),
        constraints = relation.edge_count(),
        "sorting layers"
    );
    toposort_by_level(&relation)
}

/// One node on the traversal stack and the children not yet looked at.
struct Frame<'a> {
    id: &'a str,
    children: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(id: &'a str, dependencies: &'a Dependencies) -> Self {
        Self {
            id,
            children: children_of(id, dependencies).collect(),
            next: 0,
        }
    }

    fn next_child(&mut self) -> Option<&'a str> {
        let child = self.children.get(self.next).copied();
        self.next += 1;
        child
    }
}

fn children_of<'a>(id: &'a str, dependencies: &'a Dependencies) -> impl Iterator<Item = &'a str> {
    dependencies
        .get(id)
        .into_iter()
        .flatten()
        .map(String::as_str)
}

/// For every node, the layers of all its descendants.
///
/// Post-order traversal with an explicit stack. A child still on the stack
/// (only possible if the node graph has a cycle) contributes its own layer
/// but nothing beyond it.
fn reachable_layers<'a>(
    nodes: &'a [Node],
    dependencies: &'a Dependencies,
    own_layer: &HashMap<&'a str, &'a str>,
) -> HashMap<&'a str, BTreeSet<&'a str>> {
    let mut memo: HashMap<&'a str, BTreeSet<&'a str>> = HashMap::with_capacity(nodes.len());
    let mut in_progress: HashSet<&'a str> = HashSet::new();

    for root in nodes.iter().map(|n| n.id.as_str()) {
        if memo.contains_key(root) {
            continue;
        }

        in_progress.insert(root);
        let mut stack = vec![Frame::new(root, dependencies)];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.next_child() {
                if !memo.contains_key(child) && in_progress.insert(child) {
                    stack.push(Frame::new(child, dependencies));
                }
                continue;
            }

            let Some(frame) = stack.pop() else {
                break;
            };

            let mut layers = BTreeSet::new();
            for child in frame.children.iter() {
                if let Some(layer) = own_layer.get(child) {
                    layers.insert(*layer);
                }
                if let Some(child_layers) = memo.get(child) {
                    layers.extend(child_layers.iter().copied());
                }
            }

            in_progress.remove(frame.id);
            memo.insert(frame.id, layers);
        }
    }

    memo
}

/// Kahn's algorithm, one level at a time: all layers whose parents are
/// already placed are released together, in alphabetical order.
fn toposort_by_level(relation: &DiGraphMap<&str, ()>) -> Result<Vec<String>> {
    let mut pending_parents: BTreeMap<&str, usize> = relation
        .nodes()
        .map(|layer| {
            let parents = relation.neighbors_directed(layer, Direction::Incoming).count();
            (layer, parents)
        })
        .collect();

    let mut level: Vec<&str> = pending_parents
        .iter()
        .filter(|(_, parents)| **parents == 0)
        .map(|(layer, _)| *layer)
        .collect();

    let mut ordered = Vec::with_capacity(relation.node_count());

    while !level.is_empty() {
        let mut next_level = BTreeSet::new();
        for layer in level.iter() {
            for child in relation.neighbors_directed(*layer, Direction::Outgoing) {
                if let Some(parents) = pending_parents.get_mut(&child) {
                    *parents -= 1;
                    if *parents == 0 {
                        next_level.insert(child);
                    }
                }
            }
        }
        ordered.extend(level.iter().map(|layer| layer.to_string()));
        level = next_level.into_iter().collect();
    }

    if ordered.len() < relation.node_count() {
        return Err(PipevizError::CircularLayerDependency(cyclic_layers(
            relation,
        )));
    }

    Ok(ordered)
}

/// Layers on a cycle: members of every strongly connected component with
/// more than one layer, sorted.
fn cyclic_layers(relation: &DiGraphMap<&str, ()>) -> Vec<String> {
    let mut layers: Vec<String> = tarjan_scc(relation)
        .into_iter()
        .filter(|component| component.len() > 1)
        .flatten()
        .map(str::to_string)
        .collect();
    layers.sort();
    layers
}
