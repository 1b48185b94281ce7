#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `copy` command.
//!
//! Each test builds a source and destination site in a temporary directory
//! and drives [`copy::execute`] with confirmations answered automatically.

mod common;

use common::*;
use config_utils::commands::prompt::AssumeYes;
use config_utils::commands::{ExitStatus, copy, exit_status};
use config_utils::logging::{BufferedLog, CopyStatus, Level};

const ARTICLE: &str = "\
uuid: 123e4567-e89b-12d3-a456-426614174000
_core:
  default_config_hash: 6rbs4bf
id: article
dependencies:
  config:
    - field.storage.node.body
  module:
    - node
name: Article
";

const BODY: &str = "\
id: node.body
dependencies:
  module:
    - node
    - text
type: text_with_summary
";

fn article_site() -> SiteContextBuilder {
    SiteContextBuilder::new()
        .with_source_file("node.type.article", ARTICLE)
        .with_source_file("field.storage.node.body", BODY)
        .with_source_file("system.site", "name: Source site\n")
}

// ---------------------------------------------------------------------------
// Selection and dependencies
// ---------------------------------------------------------------------------

#[test]
fn copies_selection_and_its_dependencies() {
    let ctx = article_site().with_enabled(&["node", "text"], &[]).build();
    let mut settings = ctx.settings();
    settings.machine_name_filter = Some("article".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [
            ("node.type.article".to_string(), CopyStatus::Created),
            ("field.storage.node.body".to_string(), CopyStatus::Created),
        ]
    );
    let article = ctx.read_dest("node.type.article").unwrap();
    assert!(!article.contains("_core"), "_core must not be copied");
    assert!(article.starts_with("uuid: 123e4567-e89b-12d3-a456-426614174000\nid: article\n"));
    assert_eq!(ctx.read_dest("field.storage.node.body").unwrap(), BODY);
    assert!(ctx.read_dest("system.site").is_none());
}

#[test]
fn file_name_filter_accepts_wildcards_and_extension() {
    let ctx = article_site().with_enabled(&["node", "text"], &[]).build();
    let mut settings = ctx.settings();
    settings.file_name_filter = Some("system.site.yml, field.*".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    let names: Vec<String> = file_statuses(&log).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["field.storage.node.body", "system.site"]);
}

#[test]
fn missing_dependency_aborts_before_writing() {
    let ctx = SiteContextBuilder::new()
        .with_source_file("node.type.article", ARTICLE)
        .build();
    let log = BufferedLog::new();

    let err = copy::execute(&sequential(), &ctx.settings(), &AssumeYes, &log).unwrap_err();

    assert_eq!(exit_status(&err), ExitStatus::Unknown);
    assert!(format!("{err:#}").contains("field.storage.node.body"));
    assert!(ctx.read_dest("node.type.article").is_none());
}

#[test]
fn byte_order_mark_does_not_hide_machine_name() {
    let ctx = SiteContextBuilder::new()
        .with_source_file("system.site", "\u{FEFF}id: system.site\nname: Source site\n")
        .build();
    let mut settings = ctx.settings();
    settings.machine_name_filter = Some("system.site".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [("system.site".to_string(), CopyStatus::Created)]
    );
    assert_eq!(
        ctx.read_dest("system.site").unwrap(),
        "id: system.site\nname: Source site\n"
    );
}

#[test]
fn nothing_selected_is_success() {
    let ctx = article_site().build();
    let mut settings = ctx.settings();
    settings.machine_name_filter = Some("page".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert!(file_statuses(&log).is_empty());
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

#[test]
fn unmet_module_requirement_exits_with_unmet_dependencies() {
    let ctx = article_site().with_enabled(&["node"], &[]).build();
    let mut settings = ctx.settings();
    settings.machine_name_filter = Some("article".to_string());
    let log = BufferedLog::new();

    let err = copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap_err();

    assert_eq!(exit_status(&err), ExitStatus::UnmetDependencies);
    assert!(
        log.messages(Level::Error)
            .iter()
            .any(|m| m.contains("'text'"))
    );
    assert!(ctx.read_dest("node.type.article").is_none());
}

#[test]
fn missing_core_extension_only_warns() {
    let ctx = article_site().build();
    let mut settings = ctx.settings();
    settings.machine_name_filter = Some("article".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert!(
        log.messages(Level::Warn)
            .iter()
            .any(|m| m.contains("core.extension"))
    );
    assert!(ctx.read_dest("node.type.article").is_some());
}

// ---------------------------------------------------------------------------
// Existing destination files
// ---------------------------------------------------------------------------

#[test]
fn equivalent_destination_file_is_unchanged() {
    let reordered = "\
id: node.body
type: text_with_summary
dependencies:
  module:
    - node
    - text
";
    let ctx = article_site()
        .with_dest_file("field.storage.node.body", reordered)
        .build();
    let mut settings = ctx.settings();
    settings.file_name_filter = Some("field.storage.node.body".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [("field.storage.node.body".to_string(), CopyStatus::Unchanged)]
    );
    assert_eq!(ctx.read_dest("field.storage.node.body").unwrap(), reordered);
}

#[test]
fn different_destination_file_is_kept_without_override() {
    let ctx = article_site()
        .with_dest_file("system.site", "name: Destination site\n")
        .build();
    let mut settings = ctx.settings();
    settings.file_name_filter = Some("system.site".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [("system.site".to_string(), CopyStatus::Different)]
    );
    assert_eq!(
        ctx.read_dest("system.site").unwrap(),
        "name: Destination site\n"
    );
}

#[test]
fn different_destination_file_is_replaced_with_override() {
    let ctx = article_site()
        .with_dest_file("system.site", "name: Destination site\n")
        .build();
    let mut settings = ctx.settings();
    settings.file_name_filter = Some("system.site".to_string());
    settings.override_existing = true;
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [("system.site".to_string(), CopyStatus::Overridden)]
    );
    assert_eq!(ctx.read_dest("system.site").unwrap(), "name: Source site\n");
}

#[test]
fn dry_run_records_without_writing() {
    let ctx = article_site()
        .with_dest_file("system.site", "name: Destination site\n")
        .build();
    let mut settings = ctx.settings();
    settings.override_existing = true;
    settings.dry_run = true;
    settings.file_name_filter = Some("system.site".to_string());
    let log = BufferedLog::new();

    copy::execute(&sequential(), &settings, &AssumeYes, &log).unwrap();

    assert_eq!(
        file_statuses(&log),
        [("system.site".to_string(), CopyStatus::DryRun)]
    );
    assert_eq!(log.messages(Level::DryRun).len(), 1);
    assert_eq!(
        ctx.read_dest("system.site").unwrap(),
        "name: Destination site\n"
    );
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[test]
fn missing_destination_directory() {
    let ctx = article_site().build();
    let mut settings = ctx.settings();
    settings.dest_dir = ctx.root.path().join("nowhere");

    let err = copy::execute(&sequential(), &settings, &AssumeYes, &BufferedLog::new())
        .unwrap_err();

    assert_eq!(exit_status(&err), ExitStatus::InvalidDestinationDirectory);
}

#[test]
fn parallel_load_gives_same_result() {
    let ctx = article_site().with_enabled(&["node", "text"], &[]).build();
    let log = BufferedLog::new();
    let global = config_utils::cli::GlobalOpts { parallel: true };

    copy::execute(&global, &ctx.settings(), &AssumeYes, &log).unwrap();

    let names: Vec<String> = file_statuses(&log).into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        ["field.storage.node.body", "node.type.article", "system.site"]
    );
}
