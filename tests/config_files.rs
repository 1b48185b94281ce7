#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for reading, comparing and writing configuration files
//! through the public API.

mod common;

use common::*;
use config_utils::config::{ConfigDirectory, ConfigFile, DEFAULT_NODE_FILTER, LoadOptions};
use config_utils::error::{ConfigUtilsError, FormatError, ParseError};
use config_utils::logging::BufferedLog;

const ARTICLE: &str = "\
id: node.type.article
uuid: 123e4567-e89b-12d3-a456-426614174000
dependencies:
  config:
    - field.field.node.article.body
  module:
    - node
";

fn load(dir: &std::path::Path, name: &str) -> Result<ConfigFile, ConfigUtilsError> {
    ConfigFile::load(
        &dir.join(format!("{name}.yml")),
        DEFAULT_NODE_FILTER,
        &BufferedLog::new(),
    )
}

#[test]
fn article_round_trips_through_disk() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "node.type.article.yml", ARTICLE);
    let file = load(tmp.path(), "node.type.article").unwrap();
    assert_eq!(file.name(), "node.type.article");
    assert_eq!(file.machine_name(), Some("node.type.article"));
    assert_eq!(
        file.uuid().unwrap().map(|u| u.to_string()).as_deref(),
        Some("123e4567-e89b-12d3-a456-426614174000")
    );

    let out = tmp.path().join("out");
    std::fs::create_dir(&out).unwrap();
    file.save(&out.join("node.type.article.yml")).unwrap();
    assert_eq!(
        std::fs::read_to_string(out.join("node.type.article.yml")).unwrap(),
        ARTICLE
    );
}

#[test]
fn empty_array_is_written_with_two_spaces() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "a.yml", "name: { }\n");
    let file = load(tmp.path(), "a").unwrap();
    let node = file.top_level("name").unwrap();
    assert!(file.tree().node(node).is_array());
    assert!(file.tree().node(node).children().is_empty());
    assert_eq!(file.render(), "name: {  }\n");
}

#[test]
fn tab_indentation_is_a_format_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "a.yml", "\tname: x\n");
    let err = load(tmp.path(), "a").unwrap_err();
    assert!(matches!(
        err,
        ConfigUtilsError::Parse {
            source: ParseError::Format(FormatError::NonSpaceIndent { .. }),
            ..
        }
    ));
}

#[test]
fn uuid_position_does_not_matter_but_values_do() {
    let tmp = tempfile::tempdir().unwrap();
    let moved = "\
id: node.type.article
dependencies:
  config:
    - field.field.node.article.body
  module:
    - node
uuid: 123e4567-e89b-12d3-a456-426614174000
";
    write_file(tmp.path(), "a/node.type.article.yml", ARTICLE);
    write_file(tmp.path(), "b/node.type.article.yml", moved);
    write_file(
        tmp.path(),
        "c/node.type.article.yml",
        &moved.replace("- node", "- text"),
    );
    let options = LoadOptions::default();
    let log = BufferedLog::new();
    let dirs: Vec<ConfigDirectory> = ["a", "b", "c"]
        .iter()
        .map(|d| ConfigDirectory::load(&tmp.path().join(d), &options, &log).unwrap())
        .collect();
    let a = dirs[0].file("node.type.article").unwrap();
    let b = dirs[1].file("node.type.article").unwrap();
    let c = dirs[2].file("node.type.article").unwrap();
    assert!(a.equivalent(b));
    assert!(!a.equivalent(c));
}
