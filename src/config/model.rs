// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::DEFAULT_PIPELINE;

/// Configuration exactly as read from a TOML project file.
///
/// ```toml
/// [config]
/// default_pipeline = "__default__"
///
/// [catalog.layers]
/// raw = ["companies", "shuttles@csv"]
/// primary = ["model_input_table"]
///
/// [task.preprocess_companies]
/// func = "preprocess_companies"
/// inputs = ["companies"]
/// outputs = ["preprocessed_companies"]
/// tags = ["preprocessing"]
///
/// [pipelines]
/// __default__ = ["preprocess_companies"]
/// ```
///
/// All sections are optional at this level; semantic checks happen when the
/// raw file is converted into a [`ConfigFile`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Dataset catalog metadata from `[catalog]`.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,

    /// Named pipelines: pipeline id -> task names.
    ///
    /// `None` means one implicit pipeline (`config.default_pipeline`)
    /// holding every task.
    #[serde(default)]
    pub pipelines: Option<BTreeMap<String, Vec<String>>>,
}

/// A validated project configuration.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)`, so holders
/// can rely on the checks in `config::validate` having passed.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub catalog: CatalogSection,
    pub task: BTreeMap<String, TaskConfig>,
    pub pipelines: Option<BTreeMap<String, Vec<String>>>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            config: raw.config,
            catalog: raw.catalog,
            task: raw.task,
            pipelines: raw.pipelines,
        }
    }

    /// Ids of every pipeline the project declares, sorted.
    pub fn pipeline_ids(&self) -> Vec<String> {
        pipeline_ids(&self.config, self.pipelines.as_ref())
    }

    /// Task names belonging to `pipeline`, or `None` if no such pipeline.
    pub fn tasks_in_pipeline(&self, pipeline: &str) -> Option<Vec<&str>> {
        tasks_in_pipeline(&self.config, &self.task, self.pipelines.as_ref(), pipeline)
    }
}

impl RawConfigFile {
    pub fn pipeline_ids(&self) -> Vec<String> {
        pipeline_ids(&self.config, self.pipelines.as_ref())
    }

    pub fn tasks_in_pipeline(&self, pipeline: &str) -> Option<Vec<&str>> {
        tasks_in_pipeline(&self.config, &self.task, self.pipelines.as_ref(), pipeline)
    }
}

fn pipeline_ids(
    config: &ConfigSection,
    pipelines: Option<&BTreeMap<String, Vec<String>>>,
) -> Vec<String> {
    match pipelines {
        Some(map) => map.keys().cloned().collect(),
        None => vec![config.default_pipeline.clone()],
    }
}

fn tasks_in_pipeline<'a>(
    config: &ConfigSection,
    tasks: &'a BTreeMap<String, TaskConfig>,
    pipelines: Option<&'a BTreeMap<String, Vec<String>>>,
    pipeline: &str,
) -> Option<Vec<&'a str>> {
    match pipelines {
        Some(map) => map
            .get(pipeline)
            .map(|names| names.iter().map(|s| s.as_str()).collect()),
        None if pipeline == config.default_pipeline => {
            Some(tasks.keys().map(|s| s.as_str()).collect())
        }
        None => None,
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Pipeline visualized when no `--pipeline` is given.
    #[serde(default = "default_pipeline")]
    pub default_pipeline: String,
}

fn default_pipeline() -> String {
    DEFAULT_PIPELINE.to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            default_pipeline: default_pipeline(),
        }
    }
}

/// `[catalog]` section.
///
/// ```toml
/// [catalog.layers]
/// raw = ["companies", "reviews@csv"]
/// intermediate = ["preprocessed_companies"]
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogSection {
    /// Layer name -> fully qualified dataset names in that layer.
    ///
    /// `None` means the catalog carries no layer information at all.
    #[serde(default)]
    pub layers: Option<BTreeMap<String, Vec<String>>>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskConfig {
    /// Identifier of the function the task applies.
    ///
    /// Falls back to the task name when omitted.
    #[serde(default)]
    pub func: Option<String>,

    /// Short display name shown instead of the full task name.
    #[serde(default)]
    pub short_name: Option<String>,

    /// Datasets read by the task, possibly transcoded (`"cars@spark"`).
    #[serde(default)]
    pub inputs: Vec<String>,

    /// Datasets written by the task.
    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}
