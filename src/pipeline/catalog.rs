// src/pipeline/catalog.rs

use std::collections::BTreeMap;

use crate::config::model::ConfigFile;
use crate::graph::ident::namespace_of;

/// Dataset catalog metadata relevant to visualization: layer membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Fully qualified dataset name -> layer.
    dataset_layers: BTreeMap<String, String>,
}

impl Catalog {
    /// A catalog without any layer information.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        let mut catalog = Self::new();
        if let Some(layers) = cfg.catalog.layers.as_ref() {
            for (layer, datasets) in layers.iter() {
                catalog = catalog.with_layer(layer.as_str(), datasets.iter().map(String::as_str));
            }
        }
        catalog
    }

    /// Place `datasets` in `layer`. A dataset already placed moves.
    pub fn with_layer<'a>(
        mut self,
        layer: &str,
        datasets: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        for dataset in datasets {
            self.dataset_layers
                .insert(dataset.to_string(), layer.to_string());
        }
        self
    }

    pub fn dataset_layers(&self) -> &BTreeMap<String, String> {
        &self.dataset_layers
    }

    /// Layer of a dataset: exact (qualified) name first, then its namespace.
    pub fn layer_of(&self, dataset: &str) -> Option<&str> {
        self.dataset_layers
            .get(dataset)
            .or_else(|| self.dataset_layers.get(namespace_of(dataset)))
            .map(String::as_str)
    }
}
