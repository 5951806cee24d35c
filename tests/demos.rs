mod common;
use crate::common::{demo_path, init_tracing};

use pipeviz::config::load_and_validate;
use pipeviz::graph::build_project_graph;
use pipeviz::graph::ident::hash_id;
use pipeviz::types::NodeType;

#[test]
fn spaceflights_default_pipeline() -> common::TestResult {
    init_tracing();
    let cfg = load_and_validate(demo_path("spaceflights.toml"))?;
    let graph = build_project_graph(&cfg, None)?;

    assert_eq!(graph.selected_pipeline, "__default__");
    assert_eq!(graph.nodes_of_type(NodeType::Task).count(), 6);
    assert_eq!(graph.nodes.len(), 18);
    assert_eq!(graph.edges.len(), 20);
    assert_eq!(
        graph.layers,
        vec!["raw", "intermediate", "primary", "model_input", "models"]
    );

    let tags: Vec<&str> = graph.tags.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(tags, vec!["data_science", "preprocessing"]);

    let pipelines: Vec<(&str, &str)> = graph
        .pipelines
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    assert_eq!(
        pipelines,
        vec![("__default__", "Default"), ("dp", "Dp"), ("ds", "Ds")]
    );
    Ok(())
}

#[test]
fn spaceflights_parameters_and_task_names() -> common::TestResult {
    let cfg = load_and_validate(demo_path("spaceflights.toml"))?;
    let graph = build_project_graph(&cfg, None)?;

    let params = graph
        .node_by_full_name("params:model_options")
        .expect("parameters node");
    assert_eq!(params.kind, NodeType::Parameters);
    assert_eq!(params.name, "Params:model Options");
    assert_eq!(params.id, hash_id("params:model_options"));
    assert_eq!(params.layer, None);

    let shuttles = graph.node_by_full_name("shuttles").expect("shuttles node");
    assert_eq!(shuttles.layer.as_deref(), Some("raw"));

    let table = graph
        .node_by_full_name("create_model_input_table")
        .expect("task node");
    assert_eq!(table.kind, NodeType::Task);
    assert_eq!(table.name, "Create Model Input Table");
    assert_eq!(table.tags, vec!["preprocessing"]);
    Ok(())
}

#[test]
fn spaceflights_sub_pipelines_only_show_their_layers() -> common::TestResult {
    let cfg = load_and_validate(demo_path("spaceflights.toml"))?;

    let dp = build_project_graph(&cfg, Some("dp"))?;
    assert_eq!(dp.selected_pipeline, "dp");
    assert_eq!(dp.nodes_of_type(NodeType::Task).count(), 3);
    assert_eq!(dp.layers, vec!["raw", "intermediate", "primary"]);
    let listed: Vec<&str> = dp.pipelines.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(listed, vec!["dp"]);
    assert!(dp.nodes.iter().all(|n| n.pipelines == vec!["dp"]));

    let ds = build_project_graph(&cfg, Some("ds"))?;
    assert_eq!(ds.layers, vec!["primary", "model_input", "models"]);
    let tags: Vec<&str> = ds.tags.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(tags, vec!["data_science"]);
    Ok(())
}

#[test]
fn transcoding_demo_matches_hand_built_chain() -> common::TestResult {
    let cfg = load_and_validate(demo_path("transcoding.toml"))?;
    let graph = build_project_graph(&cfg, None)?;

    let names: Vec<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["t1", "t2", "t3", "A", "B", "C"]);
    assert_eq!(graph.edges.len(), 5);
    assert_eq!(graph.layers, vec!["raw", "intermediate", "primary"]);
    assert!(graph.tags.is_empty());
    Ok(())
}

#[test]
fn spaceflights_nodes_list_every_pipeline_they_belong_to() -> common::TestResult {
    let cfg = load_and_validate(demo_path("spaceflights.toml"))?;
    let graph = build_project_graph(&cfg, None)?;

    let preprocess = graph
        .node_by_full_name("preprocess_companies")
        .expect("task node");
    assert_eq!(preprocess.pipelines, vec!["__default__", "dp"]);

    let train = graph.node_by_full_name("train_model").expect("task node");
    assert_eq!(train.pipelines, vec!["__default__", "ds"]);

    // Produced in dp, consumed in ds.
    let table = graph
        .node_by_full_name("model_input_table")
        .expect("dataset node");
    assert_eq!(table.pipelines, vec!["__default__", "dp", "ds"]);

    let ids: std::collections::HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), graph.nodes.len());
    Ok(())
}
