// src/graph/builder.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::graph::ident::{hash_id, namespace_of, namespace_type, pretty_name};
use crate::graph::model::{Dependencies, Edge, Node, Tag};
use crate::pipeline::{Catalog, Pipeline, Task};
use crate::types::{NodeId, NodeType};

/// Nodes, edges and tags of one or more pipelines, plus the direct
/// dependency map the layer sequencer runs on.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub tags: Vec<Tag>,
    pub dependencies: Dependencies,
}

/// Accumulated state of one dataset namespace.
#[derive(Debug, Default)]
struct NamespaceEntry {
    tags: BTreeSet<String>,
    layer: Option<String>,
    pipelines: BTreeSet<String>,
}

/// Incremental builder. Tasks must be added in the order their nodes and
/// edges should appear; [`build_node_graph`] feeds them sorted by name.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
    task_nodes: Vec<Node>,
    task_pipelines: HashMap<NodeId, BTreeSet<String>>,
    namespaces: BTreeMap<String, NamespaceEntry>,
    edges: Vec<Edge>,
    dependencies: Dependencies,
    tags: BTreeSet<String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            task_nodes: Vec::new(),
            task_pipelines: HashMap::new(),
            namespaces: BTreeMap::new(),
            edges: Vec::new(),
            dependencies: Dependencies::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Add `task` as a member of `pipeline`.
    ///
    /// A task already added through another pipeline only gains the new
    /// membership; its node and edges are not repeated.
    pub fn add_task(&mut self, task: &Task, pipeline: &str) {
        let task_id = task.id();

        if let Some(pipelines) = self.task_pipelines.get_mut(&task_id) {
            if !pipelines.insert(pipeline.to_string()) {
                warn!(task = %task.name(), id = %task_id, "skipping task with duplicate node id");
                return;
            }
            debug!(task = %task.name(), pipeline, "task shared between pipelines");
            for dataset in task.inputs().iter().chain(task.outputs()) {
                self.namespaces
                    .entry(namespace_of(dataset).to_string())
                    .or_default()
                    .pipelines
                    .insert(pipeline.to_string());
            }
            return;
        }

        debug!(task = %task.name(), id = %task_id, pipeline, "adding task node");
        self.task_pipelines
            .insert(task_id.clone(), BTreeSet::from([pipeline.to_string()]));
        self.tags.extend(task.tags().iter().cloned());
        self.task_nodes.push(Node {
            id: task_id.clone(),
            kind: NodeType::Task,
            name: task.display_name().to_string(),
            full_name: task.full_name(),
            tags: task.tags().iter().cloned().collect(),
            layer: None,
            pipelines: Vec::new(),
        });

        for dataset in task.inputs() {
            let namespace_id = self.record_namespace(dataset, task, pipeline);
            self.add_edge(namespace_id, task_id.clone());
        }

        for dataset in task.outputs() {
            let namespace_id = self.record_namespace(dataset, task, pipeline);
            self.add_edge(task_id.clone(), namespace_id);
        }
    }

    /// Merge the task's tags and the dataset's layer into its namespace
    /// entry, returning the namespace node id.
    fn record_namespace(&mut self, dataset: &str, task: &Task, pipeline: &str) -> NodeId {
        let catalog = self.catalog;
        let namespace = namespace_of(dataset);
        let entry = self.namespaces.entry(namespace.to_string()).or_default();
        entry.tags.extend(task.tags().iter().cloned());
        entry.pipelines.insert(pipeline.to_string());
        // First mapped variant wins; an unmapped variant never clears it.
        if entry.layer.is_none() {
            entry.layer = catalog.layer_of(dataset).map(str::to_string);
        }
        hash_id(namespace)
    }

    fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.dependencies
            .entry(source.clone())
            .or_default()
            .insert(target.clone());
        self.edges.push(Edge { source, target });
    }

    pub fn finish(mut self) -> NodeGraph {
        let mut nodes = std::mem::take(&mut self.task_nodes);
        for node in nodes.iter_mut() {
            if let Some(pipelines) = self.task_pipelines.remove(&node.id) {
                node.pipelines = pipelines.into_iter().collect();
            }
        }

        nodes.extend(self.namespaces.into_iter().map(|(namespace, entry)| Node {
            id: hash_id(&namespace),
            kind: namespace_type(&namespace),
            name: pretty_name(&namespace),
            tags: entry.tags.into_iter().collect(),
            layer: entry.layer,
            pipelines: entry.pipelines.into_iter().collect(),
            full_name: namespace,
        }));

        let tags = self.tags.into_iter().map(Tag::new).collect();

        NodeGraph {
            nodes,
            edges: self.edges,
            tags,
            dependencies: self.dependencies,
        }
    }
}

/// Build the nodes, edges and tags of `pipeline`, tasks sorted by name.
pub fn build_node_graph(pipeline: &Pipeline, catalog: &Catalog) -> NodeGraph {
    build_union_node_graph(std::slice::from_ref(pipeline), catalog)
}

/// Build one graph over several pipelines.
///
/// Tasks of all pipelines are sorted by name (ties keep pipeline order), so
/// a node shared between pipelines appears once and lists each of them.
pub fn build_union_node_graph(pipelines: &[Pipeline], catalog: &Catalog) -> NodeGraph {
    let mut tasks: Vec<(&Task, &str)> = pipelines
        .iter()
        .flat_map(|pipeline| pipeline.tasks().iter().map(move |task| (task, pipeline.id())))
        .collect();
    tasks.sort_by(|a, b| a.0.name().cmp(b.0.name()));

    let mut builder = GraphBuilder::new(catalog);
    for (task, pipeline) in tasks {
        builder.add_task(task, pipeline);
    }
    builder.finish()
}
