//! Selection of configuration files by file name or machine name.
//!
//! Both filters take a comma-separated list.  File names may use `*` as a
//! wildcard and may carry the `.yml` extension; machine names must match
//! exactly.

use regex::Regex;

use super::file::{ConfigFile, strip_extension};

/// Compiled file-name list.
///
/// # Examples
///
/// ```
/// use config_utils::config::filter::FileNameFilter;
///
/// let filter = FileNameFilter::new("node.type.*, system.site.yml");
/// assert!(filter.matches("node.type.article"));
/// assert!(filter.matches("system.site"));
/// assert!(!filter.matches("system_site"));
/// ```
#[derive(Debug, Clone)]
pub struct FileNameFilter {
    patterns: Vec<Regex>,
}

impl FileNameFilter {
    /// Compile a comma-separated list of names.
    #[must_use]
    pub fn new(spec: &str) -> Self {
        let patterns = split_list(spec)
            .filter_map(|name| Regex::new(&wildcard_pattern(strip_extension(name))).ok())
            .collect();
        Self { patterns }
    }

    /// Whether `name` (without extension) matches any entry.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// Anchored regex for `name` where `*` matches anything and every other
/// character is literal.
fn wildcard_pattern(name: &str) -> String {
    let literal: Vec<String> = name.split('*').map(regex::escape).collect();
    format!("^{}$", literal.join(".*"))
}

fn split_list(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Files whose name matches the comma-separated `spec`.
pub fn by_file_names<'a>(
    files: impl IntoIterator<Item = &'a ConfigFile>,
    spec: &str,
) -> Vec<&'a ConfigFile> {
    let filter = FileNameFilter::new(spec);
    files
        .into_iter()
        .filter(|f| filter.matches(f.name()))
        .collect()
}

/// Files whose machine name is one of the comma-separated `spec`.
pub fn by_machine_names<'a>(
    files: impl IntoIterator<Item = &'a ConfigFile>,
    spec: &str,
) -> Vec<&'a ConfigFile> {
    let wanted: Vec<&str> = split_list(spec).collect();
    files
        .into_iter()
        .filter(|f| f.machine_name().is_some_and(|m| wanted.contains(&m)))
        .collect()
}
