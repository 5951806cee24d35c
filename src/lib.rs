// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod logging;
pub mod pipeline;
pub mod site;
pub mod types;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_from_fs;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::graph::file::{load_graph_file, write_graph_file};
use crate::graph::{Graph, build_project_graph};
use crate::types::NodeType;

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    run_with_fs(&RealFileSystem, &args)?;
    Ok(())
}

/// Run the CLI against the given filesystem.
///
/// This wires together:
/// - pre-built graph pass-through (`--load-file`)
/// - project loading and validation
/// - graph construction
/// - writing the site directory or `--save-file`
///
/// Returns the path of the written graph, or `None` for `--dry-run`.
pub fn run_with_fs(fs: &dyn FileSystem, args: &CliArgs) -> Result<Option<PathBuf>> {
    let template = args.site_template.as_deref();

    if let Some(load_file) = args.load_file.as_deref() {
        if args.dry_run {
            let value = load_graph_file(fs, load_file)?;
            println!("pipeviz dry-run");
            println!("  load_file = {}", load_file.display());
            for key in graph::file::REQUIRED_KEYS {
                let count = value[key].as_array().map(Vec::len).unwrap_or(0);
                println!("  {key}: {count}");
            }
            return Ok(None);
        }

        let path = match args.save_file.as_deref() {
            Some(save_file) => {
                site::copy_graph_file(fs, load_file, save_file)?;
                save_file.to_path_buf()
            }
            None => site::copy_graph_into_site(fs, load_file, &args.directory, template)?,
        };
        return Ok(Some(path));
    }

    let raw = load_from_fs(fs, &args.config)?;
    let cfg = ConfigFile::try_from(raw)?;
    info!(config = ?args.config, tasks = cfg.task.len(), "loaded project");

    let graph = build_project_graph(&cfg, args.pipeline.as_deref())?;

    if args.dry_run {
        print_dry_run(&graph);
        return Ok(None);
    }

    let path = match args.save_file.as_deref() {
        Some(save_file) => {
            write_graph_file(fs, save_file, &graph)?;
            save_file.to_path_buf()
        }
        None => site::write_site(fs, &args.directory, template, &graph)?,
    };
    Ok(Some(path))
}

/// Simple dry-run output: print the graph summary.
fn print_dry_run(graph: &Graph) {
    println!("pipeviz dry-run");
    println!("  pipeline = {}", graph.selected_pipeline);
    let pipelines: Vec<&str> = graph.pipelines.iter().map(|p| p.id.as_str()).collect();
    println!("  pipelines = {:?}", pipelines);
    println!();

    let tasks: Vec<_> = graph.nodes_of_type(NodeType::Task).collect();
    println!("tasks ({}):", tasks.len());
    for node in tasks {
        println!("  - {} [{}]", node.name, node.id);
        if !node.tags.is_empty() {
            println!("      tags: {:?}", node.tags);
        }
    }

    let datasets: Vec<_> = graph.nodes.iter().filter(|n| n.kind.is_dataset()).collect();
    println!("datasets ({}):", datasets.len());
    for node in datasets {
        match &node.layer {
            Some(layer) => println!("  - {} ({}, layer: {layer})", node.full_name, node.kind),
            None => println!("  - {} ({})", node.full_name, node.kind),
        }
    }

    println!("edges: {}", graph.edges.len());
    println!("layers: {:?}", graph.layers);

    debug!("dry-run complete (nothing written)");
}
