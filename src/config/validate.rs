// src/config/validate.rs

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PipevizError, Result};
use crate::graph::ident::namespace_of;
use crate::pipeline::Task;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PipevizError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_dataset_names(cfg)?;
    validate_unique_outputs(cfg)?;
    validate_layers(cfg)?;
    validate_pipelines(cfg)?;
    validate_task_ids(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn config_error(msg: String) -> PipevizError {
    PipevizError::ConfigError(msg)
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(config_error(
            "config must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_dataset_names(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.inputs.is_empty() && task.outputs.is_empty() {
            return Err(config_error(format!(
                "task '{}' must have at least one input or output",
                name
            )));
        }
        for dataset in task.inputs.iter().chain(task.outputs.iter()) {
            if namespace_of(dataset).trim().is_empty() {
                return Err(config_error(format!(
                    "task '{}' references an invalid dataset name '{}'",
                    name, dataset
                )));
            }
        }
    }
    Ok(())
}

fn validate_unique_outputs(cfg: &RawConfigFile) -> Result<()> {
    let mut producers: HashMap<&str, &str> = HashMap::new();
    for (name, task) in cfg.task.iter() {
        for output in task.outputs.iter() {
            if let Some(previous) = producers.insert(output.as_str(), name.as_str()) {
                return Err(config_error(format!(
                    "dataset '{}' is an output of both '{}' and '{}'",
                    output, previous, name
                )));
            }
        }
    }
    Ok(())
}

fn validate_layers(cfg: &RawConfigFile) -> Result<()> {
    let Some(layers) = cfg.catalog.layers.as_ref() else {
        return Ok(());
    };

    // Variants of one namespace collapse into one node, so they must agree
    // on the layer: namespace -> (first dataset seen, its layer).
    let mut seen: HashMap<&str, (&str, &str)> = HashMap::new();
    for (layer, datasets) in layers.iter() {
        if layer.trim().is_empty() {
            return Err(config_error("[catalog.layers] contains an empty layer name".to_string()));
        }
        for dataset in datasets.iter() {
            let namespace = namespace_of(dataset);
            let Some(&(previous, previous_layer)) = seen.get(namespace) else {
                seen.insert(namespace, (dataset.as_str(), layer.as_str()));
                continue;
            };
            if previous_layer == layer.as_str() {
                continue;
            }
            if previous == dataset.as_str() {
                return Err(config_error(format!(
                    "dataset '{}' is assigned to both layer '{}' and layer '{}'",
                    dataset, previous_layer, layer
                )));
            }
            return Err(config_error(format!(
                "datasets '{}' and '{}' share namespace '{}' but are in layers '{}' and '{}'",
                previous, dataset, namespace, previous_layer, layer
            )));
        }
    }
    Ok(())
}

fn validate_pipelines(cfg: &RawConfigFile) -> Result<()> {
    let Some(pipelines) = cfg.pipelines.as_ref() else {
        return Ok(());
    };

    if !pipelines.contains_key(&cfg.config.default_pipeline) {
        return Err(config_error(format!(
            "default pipeline '{}' is not declared in [pipelines]",
            cfg.config.default_pipeline
        )));
    }

    for (pipeline, tasks) in pipelines.iter() {
        for task in tasks.iter() {
            if !cfg.task.contains_key(task) {
                return Err(config_error(format!(
                    "pipeline '{}' has unknown task '{}'",
                    pipeline, task
                )));
            }
        }
    }
    Ok(())
}

fn validate_task_ids(cfg: &RawConfigFile) -> Result<()> {
    let mut ids: HashMap<String, &str> = HashMap::new();
    for (name, task_cfg) in cfg.task.iter() {
        let id = Task::from_config(name, task_cfg).id();
        if let Some(previous) = ids.insert(id.clone(), name.as_str()) {
            return Err(config_error(format!(
                "tasks '{}' and '{}' share node id '{}'",
                previous, name, id
            )));
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: producer -> consumer, joined on dataset namespace so
    // that `cars@pandas` written by A feeds `cars@spark` read by B.
    let mut producers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, task) in cfg.task.iter() {
        for output in task.outputs.iter() {
            producers
                .entry(namespace_of(output))
                .or_default()
                .push(name.as_str());
        }
    }

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for input in task.inputs.iter() {
            for producer in producers.get(namespace_of(input)).into_iter().flatten() {
                graph.add_edge(*producer, name.as_str(), ());
            }
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(PipevizError::DagCycle(format!(
                "cycle detected in task DAG involving task '{}'",
                node
            )))
        }
    }
}
