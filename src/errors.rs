// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipevizError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Pipeline not found: {0}")]
    UnknownPipeline(String),

    #[error("Cycle detected in task DAG: {0}")]
    DagCycle(String),

    #[error("Invalid file, top level key '{key}' not found.")]
    InvalidGraphFile { key: String },

    #[error("Circular dependency between layers: {}", .0.join(", "))]
    CircularLayerDependency(Vec<String>),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipevizError>;
