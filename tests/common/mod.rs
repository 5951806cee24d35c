#![allow(dead_code)]

pub use pipeviz_test_utils::builders;
pub use pipeviz_test_utils::init_tracing;

use std::path::PathBuf;

use pipeviz::pipeline::{Catalog, Pipeline, Task};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

pub fn task(name: &str, inputs: &[&str], outputs: &[&str]) -> Task {
    Task::new(name, inputs.iter().copied(), outputs.iter().copied())
}

/// `t1: [] -> [a]`, `t2: [a] -> [b@pandas]`, `t3: [b@spark] -> [c]`,
/// with `a` raw, `b` intermediate and `c` primary.
pub fn transcoded_chain() -> (Pipeline, Catalog) {
    let pipeline = Pipeline::new(
        "__default__",
        vec![
            task("t3", &["b@spark"], &["c"]),
            task("t1", &[], &["a"]),
            task("t2", &["a"], &["b@pandas"]),
        ],
    );
    let catalog = Catalog::new()
        .with_layer("raw", ["a"])
        .with_layer("intermediate", ["b"])
        .with_layer("primary", ["c"]);
    (pipeline, catalog)
}
