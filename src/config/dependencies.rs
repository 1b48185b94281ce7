//! Transitive `dependencies.config` closure and module/theme availability.

use std::collections::{HashSet, VecDeque};

use super::directory::{CORE_EXTENSION, ConfigDirectory};
use super::file::ConfigFile;
use crate::error::DependencyError;
use crate::logging::Log;

/// Lazy breadth-first walk over `dependencies.config` references.
///
/// Yields every file reachable from the selection, each at most once and
/// never one of the selected files themselves.  A name that does not exist
/// in the directory yields a single [`DependencyError::NotFound`], after
/// which the walk is over.
#[derive(Debug)]
pub struct DependencyClosure<'d> {
    directory: &'d ConfigDirectory,
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

impl<'d> DependencyClosure<'d> {
    fn new<'s>(
        directory: &'d ConfigDirectory,
        selection: impl IntoIterator<Item = &'s ConfigFile>,
    ) -> Self {
        let selection: Vec<&ConfigFile> = selection.into_iter().collect();
        let mut closure = Self {
            directory,
            queue: VecDeque::new(),
            visited: selection.iter().map(|f| f.name().to_string()).collect(),
        };
        for file in selection {
            closure.enqueue(file);
        }
        closure
    }

    fn enqueue(&mut self, file: &ConfigFile) {
        for name in file.dependencies_of("config") {
            if self.visited.insert(name.to_string()) {
                self.queue.push_back(name.to_string());
            }
        }
    }
}

impl<'d> Iterator for DependencyClosure<'d> {
    type Item = Result<&'d ConfigFile, DependencyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.queue.pop_front()?;
        let Some(file) = self.directory.file(&name) else {
            self.queue.clear();
            return Some(Err(DependencyError::NotFound(name)));
        };
        self.enqueue(file);
        Some(Ok(file))
    }
}

/// Outcome of checking required modules and themes against `core.extension`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementReport {
    /// Distinct `dependencies.module` entries, in first-seen order.
    pub required_modules: Vec<String>,
    /// Distinct `dependencies.theme` entries, in first-seen order.
    pub required_themes: Vec<String>,
    /// Required modules not enabled at the destination.
    pub missing_modules: Vec<String>,
    /// Required themes not enabled at the destination.
    pub missing_themes: Vec<String>,
    /// `false` when there was no `core.extension` to check against.
    pub availability_known: bool,
}

impl RequirementReport {
    /// Whether nothing required is missing.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.missing_modules.is_empty() && self.missing_themes.is_empty()
    }
}

impl ConfigDirectory {
    /// Files referenced, directly or transitively, by `selection`.
    pub fn dependencies<'s>(
        &self,
        selection: impl IntoIterator<Item = &'s ConfigFile>,
    ) -> DependencyClosure<'_> {
        DependencyClosure::new(self, selection)
    }

    /// The whole closure of `selection`, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::NotFound`] if any referenced file is
    /// missing; no partial result is returned.
    pub fn resolve_dependencies<'s>(
        &self,
        selection: impl IntoIterator<Item = &'s ConfigFile>,
    ) -> Result<Vec<&ConfigFile>, DependencyError> {
        self.dependencies(selection).collect()
    }

    /// Check that every module and theme `files` depend on is enabled in
    /// this directory's `core.extension`.
    ///
    /// Without a `core.extension` the check cannot be made; a warning is
    /// logged and the report counts as satisfied.
    #[must_use]
    pub fn check_requirements(&self, files: &[&ConfigFile], log: &dyn Log) -> RequirementReport {
        let required_modules = distinct(files, "module");
        let required_themes = distinct(files, "theme");
        log_required(log, "modules", &required_modules);
        log_required(log, "themes", &required_themes);

        let Some(core) = self.core_extension() else {
            log.warn(&format!(
                "{}.yml not found in {}; module and theme requirements cannot be verified",
                CORE_EXTENSION,
                self.path().display()
            ));
            return RequirementReport {
                required_modules,
                required_themes,
                availability_known: false,
                ..RequirementReport::default()
            };
        };

        let missing_modules = missing(core, "module", &required_modules);
        let missing_themes = missing(core, "theme", &required_themes);
        for name in &missing_modules {
            log.error(&format!("required module '{name}' is not enabled"));
        }
        for name in &missing_themes {
            log.error(&format!("required theme '{name}' is not enabled"));
        }

        let report = RequirementReport {
            required_modules,
            required_themes,
            missing_modules,
            missing_themes,
            availability_known: true,
        };
        if report.is_satisfied() {
            log.info(&format!(
                "all {} required modules and {} required themes are enabled",
                report.required_modules.len(),
                report.required_themes.len()
            ));
        }
        report
    }
}

fn log_required(log: &dyn Log, kind: &str, names: &[String]) {
    if names.is_empty() {
        log.info(&format!("no {kind} required"));
    } else {
        log.info(&format!("required {kind}: {}", names.join(", ")));
    }
}

fn distinct(files: &[&ConfigFile], kind: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    files
        .iter()
        .flat_map(|f| f.dependencies_of(kind))
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}

/// Entries of `required` that are not child names of `core`'s `kind` node.
fn missing(core: &ConfigFile, kind: &str, required: &[String]) -> Vec<String> {
    let tree = core.tree();
    let available: HashSet<&str> = core
        .top_level(kind)
        .map(|node| {
            tree.node(node)
                .children()
                .iter()
                .map(|&c| tree.node(c).name())
                .collect()
        })
        .unwrap_or_default();
    required
        .iter()
        .filter(|name| !available.contains(name.as_str()))
        .cloned()
        .collect()
}
