//! Exported site configuration utilities.
//!
//! Reads directories of `.yml` configuration exports, compares and clones
//! individual files, follows their `dependencies.config` references and
//! rewrites names for derived themes.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: the restricted YAML reader/writer, the node tree and
//!   directory-level operations (filters, dependency closure)
//! - **[`options`]**: the TOML options file for the `copy` command
//! - **[`logging`]**: the diagnostics sink shared by every layer
//! - **[`commands`]**: top-level subcommand orchestration (`copy`, `subtheme`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
