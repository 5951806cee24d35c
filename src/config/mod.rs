// src/config/mod.rs

//! Project configuration for pipeviz.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk (`loader.rs`).
//! - Validate pipeline invariants before any graph is built (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CatalogSection, ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
