// src/graph/mod.rs

//! Visualization graph construction.
//!
//! - [`ident`] derives node ids and display names.
//! - [`builder`] turns a pipeline's tasks and datasets into nodes and edges.
//! - [`layers`] orders the catalog layers along the dependency graph.
//! - [`model`] holds the output types.
//! - [`file`] reads and writes the JSON form.

pub mod builder;
pub mod file;
pub mod ident;
pub mod layers;
pub mod model;

pub use builder::{GraphBuilder, NodeGraph, build_node_graph, build_union_node_graph};
pub use layers::sort_layers;
pub use model::{Dependencies, Edge, Graph, Node, PipelineRef, Tag};

use tracing::info;

use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::pipeline::{Catalog, Pipeline};
use crate::types::DEFAULT_PIPELINE;

/// Build the complete graph of one pipeline.
pub fn build_graph(pipeline: &Pipeline, catalog: &Catalog) -> Result<Graph> {
    build_graphs(std::slice::from_ref(pipeline), pipeline.id(), catalog)
}

/// Build the graph of a project from a validated config.
///
/// With `Some(name)` only that pipeline is built and listed. With `None`
/// every pipeline of the project goes into one graph, each node listing the
/// pipelines it belongs to, and the project's default pipeline is selected.
pub fn build_project_graph(cfg: &ConfigFile, pipeline: Option<&str>) -> Result<Graph> {
    let catalog = Catalog::from_config(cfg);

    if let Some(id) = pipeline {
        let pipeline = Pipeline::from_config(cfg, id)?;
        return build_graph(&pipeline, &catalog);
    }

    let pipelines = cfg
        .pipeline_ids()
        .iter()
        .map(|id| Pipeline::from_config(cfg, id))
        .collect::<Result<Vec<_>>>()?;
    let selected = select_pipeline(&pipelines, &cfg.config.default_pipeline);
    build_graphs(&pipelines, &selected, &catalog)
}

/// The configured default pipeline, else `__default__`, else the first one.
fn select_pipeline(pipelines: &[Pipeline], default_pipeline: &str) -> String {
    [default_pipeline, DEFAULT_PIPELINE]
        .into_iter()
        .find(|id| pipelines.iter().any(|p| p.id() == *id))
        .or_else(|| pipelines.first().map(Pipeline::id))
        .unwrap_or(DEFAULT_PIPELINE)
        .to_string()
}

fn build_graphs(pipelines: &[Pipeline], selected: &str, catalog: &Catalog) -> Result<Graph> {
    let NodeGraph {
        nodes,
        edges,
        tags,
        dependencies,
    } = build_union_node_graph(pipelines, catalog);

    let layers = sort_layers(&nodes, &dependencies)?;

    info!(
        pipelines = pipelines.len(),
        selected = %selected,
        nodes = nodes.len(),
        edges = edges.len(),
        layers = layers.len(),
        "built pipeline graph"
    );

    Ok(Graph {
        edges,
        layers,
        nodes,
        pipelines: pipelines.iter().map(|p| PipelineRef::new(p.id())).collect(),
        selected_pipeline: selected.to_string(),
        tags,
    })
}
