// src/pipeline/mod.rs

//! Normalized pipeline description consumed by the graph builder.
//!
//! - [`task`] holds a single task (a function applied to datasets).
//! - [`catalog`] maps fully qualified dataset names to layers.
//!
//! A [`Pipeline`] is a named, ordered collection of tasks. It can be built
//! from a validated [`ConfigFile`] or assembled directly by a host.

pub mod catalog;
pub mod task;

pub use catalog::Catalog;
pub use task::Task;

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{PipevizError, Result};

#[derive(Debug, Clone)]
pub struct Pipeline {
    id: String,
    tasks: Vec<Task>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            tasks,
        }
    }

    /// Build the pipeline `id` from a validated config.
    pub fn from_config(cfg: &ConfigFile, id: &str) -> Result<Self> {
        let names = cfg
            .tasks_in_pipeline(id)
            .ok_or_else(|| PipevizError::UnknownPipeline(id.to_string()))?;

        let tasks = names
            .into_iter()
            .filter_map(|name| {
                cfg.task
                    .get(name)
                    .map(|task_cfg| Task::from_config(name, task_cfg))
            })
            .collect::<Vec<_>>();

        debug!(pipeline = %id, tasks = tasks.len(), "assembled pipeline");
        Ok(Self::new(id, tasks))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tasks in declaration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
