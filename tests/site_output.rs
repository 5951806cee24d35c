mod common;
use crate::common::init_tracing;

use std::path::{Path, PathBuf};

use clap::Parser;

use pipeviz::cli::CliArgs;
use pipeviz::errors::PipevizError;
use pipeviz::fs::FileSystem;
use pipeviz::fs::mock::MockFileSystem;
use pipeviz::run_with_fs;

const PROJECT: &str = r#"
[catalog.layers]
raw = ["companies"]
primary = ["companies_clean"]

[task.clean]
inputs = ["companies"]
outputs = ["companies_clean"]
tags = ["etl"]

[task.report]
inputs = ["companies_clean@pandas"]
outputs = ["summary"]
"#;

const PREBUILT: &str = r#"{"nodes": [], "edges": [], "tags": [], "layers": []}"#;

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["pipeviz"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("valid arguments")
}

fn project_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("Pipeviz.toml", PROJECT);
    fs
}

#[test]
fn default_run_writes_graph_into_public() -> common::TestResult {
    init_tracing();
    let fs = project_fs();

    let written = run_with_fs(&fs, &args(&[]))?;
    assert_eq!(written, Some(PathBuf::from("public/pipeline.json")));

    let json = fs.read_to_string(Path::new("public/pipeline.json"))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["layers"], serde_json::json!(["raw", "primary"]));
    Ok(())
}

#[test]
fn template_is_copied_before_graph_is_written() -> common::TestResult {
    let fs = project_fs();
    fs.add_file("template/index.html", "<html></html>");
    fs.add_file("template/static/app.js", "console.log('viz');");
    fs.add_file("site/stale.txt", "old");

    run_with_fs(
        &fs,
        &args(&["--directory", "site", "--site-template", "template"]),
    )?;

    assert_eq!(fs.read_to_string(Path::new("site/index.html"))?, "<html></html>");
    assert_eq!(
        fs.read_to_string(Path::new("site/static/app.js"))?,
        "console.log('viz');"
    );
    assert!(fs.is_file(Path::new("site/pipeline.json")));
    assert!(!fs.exists(Path::new("site/stale.txt")));
    Ok(())
}

#[test]
fn missing_template_is_an_error() {
    let fs = project_fs();
    let result = run_with_fs(&fs, &args(&["--site-template", "nowhere"]));
    assert!(matches!(result, Err(PipevizError::Other(_))));
}

#[test]
fn save_file_bypasses_site_directory() -> common::TestResult {
    let fs = project_fs();

    let written = run_with_fs(&fs, &args(&["--save-file", "out/graph.json"]))?;
    assert_eq!(written, Some(PathBuf::from("out/graph.json")));
    assert!(fs.is_file(Path::new("out/graph.json")));
    assert!(!fs.exists(Path::new("public")));
    Ok(())
}

#[test]
fn save_file_conflicts_with_site_template() {
    let result = CliArgs::try_parse_from([
        "pipeviz",
        "--save-file",
        "graph.json",
        "--site-template",
        "template",
    ]);
    assert!(result.is_err());
}

#[test]
fn loaded_file_is_copied_byte_for_byte() -> common::TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("prebuilt.json", PREBUILT);

    let written = run_with_fs(&fs, &args(&["--load-file", "prebuilt.json"]))?;
    assert_eq!(written, Some(PathBuf::from("public/pipeline.json")));
    assert_eq!(fs.read_to_string(Path::new("public/pipeline.json"))?, PREBUILT);
    Ok(())
}

#[test]
fn invalid_loaded_file_leaves_directory_untouched() {
    let fs = MockFileSystem::new();
    fs.add_file("prebuilt.json", r#"{"nodes": [], "edges": []}"#);

    let result = run_with_fs(&fs, &args(&["--load-file", "prebuilt.json", "--directory", "out"]));
    match result {
        Err(PipevizError::InvalidGraphFile { key }) => assert_eq!(key, "tags"),
        other => panic!("Expected InvalidGraphFile, got: {:?}", other),
    }
    assert!(!fs.exists(Path::new("out")));
}

#[test]
fn loaded_file_can_go_to_save_file() -> common::TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("prebuilt.json", PREBUILT);

    run_with_fs(
        &fs,
        &args(&["--load-file", "prebuilt.json", "--save-file", "copy.json"]),
    )?;
    assert_eq!(fs.read_to_string(Path::new("copy.json"))?, PREBUILT);
    Ok(())
}

#[test]
fn dry_run_writes_nothing() -> common::TestResult {
    let fs = project_fs();
    let before = fs.file_paths();

    assert_eq!(run_with_fs(&fs, &args(&["--dry-run"]))?, None);
    assert_eq!(fs.file_paths(), before);

    fs.add_file("prebuilt.json", PREBUILT);
    let before = fs.file_paths();
    assert_eq!(
        run_with_fs(&fs, &args(&["--dry-run", "--load-file", "prebuilt.json"]))?,
        None
    );
    assert_eq!(fs.file_paths(), before);
    Ok(())
}

#[test]
fn missing_project_file_fails() {
    let fs = MockFileSystem::new();
    let result = run_with_fs(&fs, &args(&["--config", "Missing.toml"]));
    assert!(matches!(result, Err(PipevizError::Other(_))));
}

#[test]
fn unknown_pipeline_flag_fails() {
    let fs = project_fs();
    let result = run_with_fs(&fs, &args(&["--pipeline", "reporting"]));
    assert!(matches!(result, Err(PipevizError::UnknownPipeline(_))));
    assert!(!fs.exists(Path::new("public")));
}
