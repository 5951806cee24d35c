mod common;
use crate::common::{demo_path, init_tracing, transcoded_chain};

use std::io::Write;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

use pipeviz::errors::PipevizError;
use pipeviz::fs::RealFileSystem;
use pipeviz::graph::build_graph;
use pipeviz::pipeline::Catalog;
use pipeviz::graph::file::{
    load_graph_file, parse_graph_json, to_canonical_json, validate_graph_value, write_graph_file,
};

#[test]
fn canonical_json_sorts_keys_and_indents_four_spaces() -> common::TestResult {
    init_tracing();
    let (pipeline, catalog) = transcoded_chain();
    let graph = build_graph(&pipeline, &catalog)?;

    let json = to_canonical_json(&graph)?;
    assert!(json.starts_with("{\n    \"edges\": [\n        {\n            \"source\": "));

    let value: Value = serde_json::from_str(&json)?;
    let keys: Vec<&str> = value
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(
        keys,
        vec!["edges", "layers", "nodes", "pipelines", "selected_pipeline", "tags"]
    );
    assert_eq!(value["layers"], json!(["raw", "intermediate", "primary"]));
    assert_eq!(value["selected_pipeline"], json!("__default__"));
    assert_eq!(value["pipelines"], json!([{"id": "__default__", "name": "Default"}]));
    Ok(())
}

#[test]
fn task_nodes_have_no_layer_key_dataset_nodes_always_do() -> common::TestResult {
    let (pipeline, catalog) = transcoded_chain();
    let graph = build_graph(&pipeline, &catalog)?;
    let value: Value = serde_json::from_str(&to_canonical_json(&graph)?)?;

    let task = &value["nodes"][0];
    assert_eq!(task["type"], json!("task"));
    assert!(task.get("layer").is_none());
    assert_eq!(task["tags"], json!([]));
    assert_eq!(task["pipelines"], json!(["__default__"]));
    let keys: Vec<&str> = task
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["full_name", "id", "name", "pipelines", "tags", "type"]);

    let a = &value["nodes"][3];
    assert_eq!(a["type"], json!("data"));
    assert_eq!(a["name"], json!("A"));
    assert_eq!(a["full_name"], json!("a"));
    assert_eq!(a["layer"], json!("raw"));

    let no_layers = build_graph(&pipeline, &Catalog::new())?;
    let value: Value = serde_json::from_str(&to_canonical_json(&no_layers)?)?;
    assert_eq!(value["nodes"][4].get("layer"), Some(&Value::Null));
    Ok(())
}

#[test]
fn same_input_gives_same_bytes() -> common::TestResult {
    let (pipeline, catalog) = transcoded_chain();
    let first = to_canonical_json(&build_graph(&pipeline, &catalog)?)?;
    let second = to_canonical_json(&build_graph(&pipeline, &catalog)?)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn missing_tags_key_is_rejected() {
    let result = parse_graph_json(r#"{"nodes": [], "edges": []}"#);

    match result {
        Err(PipevizError::InvalidGraphFile { key }) => assert_eq!(key, "tags"),
        other => panic!("Expected InvalidGraphFile, got: {:?}", other),
    }
}

#[test]
fn first_missing_key_is_named() {
    let err = validate_graph_value(&json!({"edges": []})).unwrap_err();
    assert!(matches!(err, PipevizError::InvalidGraphFile { ref key } if key == "nodes"));
    assert_eq!(
        err.to_string(),
        "Invalid file, top level key 'nodes' not found."
    );

    let err = validate_graph_value(&json!({"nodes": [], "tags": []})).unwrap_err();
    assert!(matches!(err, PipevizError::InvalidGraphFile { ref key } if key == "edges"));
}

#[test]
fn non_object_documents_are_rejected() {
    assert!(matches!(
        validate_graph_value(&json!([1, 2, 3])),
        Err(PipevizError::InvalidGraphFile { .. })
    ));
    assert!(matches!(
        parse_graph_json("not json"),
        Err(PipevizError::JsonError(_))
    ));
}

#[test]
fn layers_key_is_optional_in_loaded_files() -> common::TestResult {
    let value = parse_graph_json(r#"{"nodes": [], "edges": [], "tags": [], "extra": true}"#)?;
    assert_eq!(value["extra"], json!(true));
    Ok(())
}

#[test]
fn demo_file_without_tags_fails_to_load() {
    let result = load_graph_file(&RealFileSystem, &demo_path("graph-missing-tags.json"));
    match result {
        Err(PipevizError::InvalidGraphFile { key }) => assert_eq!(key, "tags"),
        other => panic!("Expected InvalidGraphFile, got: {:?}", other),
    }
}

#[test]
fn written_file_loads_back() -> common::TestResult {
    let (pipeline, catalog) = transcoded_chain();
    let graph = build_graph(&pipeline, &catalog)?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("pipeline.json");
    write_graph_file(&RealFileSystem, &path, &graph)?;

    let value = load_graph_file(&RealFileSystem, &path)?;
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(6));
    assert_eq!(std::fs::read_to_string(&path)?, to_canonical_json(&graph)?);
    Ok(())
}

#[test]
fn load_reads_from_disk() -> common::TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{"nodes": [{{"id": "abcd1234"}}], "edges": [], "tags": [], "layers": ["raw"]}}"#
    )?;

    let value = load_graph_file(&RealFileSystem, file.path())?;
    assert_eq!(value["layers"], json!(["raw"]));
    Ok(())
}
