#![allow(dead_code)]

use std::collections::BTreeMap;

use pipeviz::config::{CatalogSection, ConfigFile, ConfigSection, RawConfigFile, TaskConfig};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                catalog: CatalogSection::default(),
                task: BTreeMap::new(),
                pipelines: None,
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    /// Place `datasets` in `layer`.
    pub fn with_layer(mut self, layer: &str, datasets: &[&str]) -> Self {
        let layers = self.config.catalog.layers.get_or_insert_with(BTreeMap::new);
        layers
            .entry(layer.to_string())
            .or_default()
            .extend(datasets.iter().map(|d| d.to_string()));
        self
    }

    /// Declare a named pipeline. Once any pipeline is declared, only
    /// declared pipelines exist.
    pub fn with_pipeline(mut self, name: &str, tasks: &[&str]) -> Self {
        let pipelines = self.config.pipelines.get_or_insert_with(BTreeMap::new);
        pipelines.insert(
            name.to_string(),
            tasks.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_default_pipeline(mut self, name: &str) -> Self {
        self.config.config.default_pipeline = name.to_string();
        self
    }

    /// The unvalidated config, for exercising validation failures.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new() -> Self {
        Self {
            task: TaskConfig::default(),
        }
    }

    pub fn func(mut self, func: &str) -> Self {
        self.task.func = Some(func.to_string());
        self
    }

    pub fn short_name(mut self, short_name: &str) -> Self {
        self.task.short_name = Some(short_name.to_string());
        self
    }

    pub fn input(mut self, dataset: &str) -> Self {
        self.task.inputs.push(dataset.to_string());
        self
    }

    pub fn output(mut self, dataset: &str) -> Self {
        self.task.outputs.push(dataset.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.task.tags.push(tag.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

impl Default for TaskConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
