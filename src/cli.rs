//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "config-utils",
    about = "Compare, copy and rewrite exported site configuration",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Disable parallel parsing of configuration files (parallel is enabled by default)
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy selected configuration files and their dependencies to another directory
    Copy(CopyOpts),
    /// Create a subtheme's configuration from a theme's configuration
    Subtheme(SubthemeOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Copy(_) => "copy",
            Self::Subtheme(_) => "subtheme",
            Self::Version => "version",
        }
    }
}

/// Options for the `copy` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct CopyOpts {
    /// Directory to copy configuration files from
    #[arg(short, long)]
    pub source_dir: Option<PathBuf>,

    /// Directory to copy configuration files to
    #[arg(short, long)]
    pub dest_dir: Option<PathBuf>,

    /// Comma-separated machine names (`id` values) to copy
    #[arg(short, long)]
    pub machine_name_filter: Option<String>,

    /// Comma-separated file names to copy; `*` matches any text
    #[arg(short, long)]
    pub file_name_filter: Option<String>,

    /// Overwrite destination files that differ
    #[arg(short = 'o', long = "override")]
    pub override_existing: bool,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// TOML file with default values for the options above
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,
}

/// Options for the `subtheme` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SubthemeOpts {
    /// Directory of the theme to derive from
    #[arg(short, long)]
    pub theme: PathBuf,

    /// Directory of the subtheme to create configuration for
    #[arg(short, long)]
    pub subtheme: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,
}
