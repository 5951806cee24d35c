// src/pipeline/task.rs

use std::collections::BTreeSet;
use std::fmt;

use crate::config::model::TaskConfig;
use crate::graph::ident::hash_id;
use crate::types::NodeId;

/// One task of a pipeline: a function reading some datasets and writing
/// others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    func: Option<String>,
    short_name: Option<String>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    tags: BTreeSet<String>,
}

impl Task {
    pub fn new<I, O, S, T>(name: impl Into<String>, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            func: None,
            short_name: None,
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            tags: BTreeSet::new(),
        }
    }

    pub fn from_config(name: &str, cfg: &TaskConfig) -> Self {
        Self {
            name: name.to_string(),
            func: cfg.func.clone(),
            short_name: cfg.short_name.clone(),
            inputs: cfg.inputs.clone(),
            outputs: cfg.outputs.clone(),
            tags: cfg.tags.iter().cloned().collect(),
        }
    }

    pub fn with_func(mut self, func: impl Into<String>) -> Self {
        self.func = Some(func.into());
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Function identifier, or the task name when no function was given.
    pub fn func_name(&self) -> &str {
        self.func.as_deref().unwrap_or(&self.name)
    }

    /// Label shown on the node.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }

    /// `full_name` of the task node.
    pub fn full_name(&self) -> String {
        match &self.func {
            Some(func) => func.clone(),
            None => self.to_string(),
        }
    }

    /// Node id: hash of the canonical repr (see the `Display` impl).
    pub fn id(&self) -> NodeId {
        hash_id(&self.to_string())
    }
}

/// Canonical repr: `name: func([in1,in2]) -> [out]`, with `None` standing
/// in for an empty side.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}({}) -> {}",
            self.name,
            self.func_name(),
            datasets_repr(&self.inputs),
            datasets_repr(&self.outputs)
        )
    }
}

fn datasets_repr(datasets: &[String]) -> String {
    if datasets.is_empty() {
        "None".to_string()
    } else {
        format!("[{}]", datasets.join(","))
    }
}
