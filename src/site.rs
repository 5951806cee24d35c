// src/site.rs

//! Static site output.
//!
//! The front-end is a prebuilt bundle that fetches `pipeline.json` from its
//! own directory. This module seeds the output directory from that bundle
//! (if one is given) and places the graph next to it.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::graph::Graph;
use crate::graph::file::{parse_graph_json, write_graph_file};

/// File name the front-end loads the graph from.
pub const GRAPH_FILE_NAME: &str = "pipeline.json";

/// Where the graph lives inside a site directory.
pub fn graph_path(directory: &Path) -> PathBuf {
    directory.join(GRAPH_FILE_NAME)
}

/// Create `directory`. With a template, any existing directory is replaced
/// by a copy of the template.
pub fn prepare_directory(
    fs: &dyn FileSystem,
    directory: &Path,
    template: Option<&Path>,
) -> Result<()> {
    let Some(template) = template else {
        fs.create_dir_all(directory)?;
        return Ok(());
    };

    if !fs.is_dir(template) {
        return Err(anyhow!("site template {:?} is not a directory", template).into());
    }

    if fs.exists(directory) {
        debug!(directory = ?directory, "removing previous site directory");
        fs.remove_dir_all(directory)?;
    }

    let copied = copy_dir(fs, template, directory)?;
    info!(template = ?template, directory = ?directory, files = copied, "copied site template");
    Ok(())
}

/// Recursively copy `from` into `to`; returns the number of files copied.
fn copy_dir(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<usize> {
    fs.create_dir_all(to)?;

    let mut copied = 0;
    for entry in fs.read_dir(from)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = to.join(name);
        if fs.is_dir(&entry) {
            copied += copy_dir(fs, &entry, &target)?;
        } else {
            let contents = fs
                .read(&entry)
                .with_context(|| format!("copying {:?} to {:?}", entry, target))?;
            fs.write(&target, &contents)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Write a freshly built graph into the site directory.
pub fn write_site(
    fs: &dyn FileSystem,
    directory: &Path,
    template: Option<&Path>,
    graph: &Graph,
) -> Result<PathBuf> {
    prepare_directory(fs, directory, template)?;
    let path = graph_path(directory);
    write_graph_file(fs, &path, graph)?;
    Ok(path)
}

/// Validate a pre-built graph file and copy it to `dest` byte-for-byte.
pub fn copy_graph_file(fs: &dyn FileSystem, load_file: &Path, dest: &Path) -> Result<()> {
    let contents = fs.read_to_string(load_file)?;
    parse_graph_json(&contents)?;
    fs.write(dest, contents.as_bytes())?;
    info!(source = ?load_file, path = ?dest, "copied pre-built pipeline graph");
    Ok(())
}

/// Validate a pre-built graph file and place it in the site directory.
///
/// Validation happens before the directory is touched.
pub fn copy_graph_into_site(
    fs: &dyn FileSystem,
    load_file: &Path,
    directory: &Path,
    template: Option<&Path>,
) -> Result<PathBuf> {
    let contents = fs.read_to_string(load_file)?;
    parse_graph_json(&contents)?;

    prepare_directory(fs, directory, template)?;
    let path = graph_path(directory);
    fs.write(&path, contents.as_bytes())?;
    info!(source = ?load_file, path = ?path, "copied pre-built pipeline graph");
    Ok(path)
}
