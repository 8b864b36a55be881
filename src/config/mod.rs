pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::parse::java::{DEFAULT_ENDPOINT_ANNOTATIONS, DEFAULT_ENTITY_MARKERS};
use crate::parse::python::{DEFAULT_MODEL_BASE, DEFAULT_ROUTE_DECORATORS};
use crate::parse::rest_client::DEFAULT_CALL_VERBS;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Directory name whose whole subtree is skipped during source traversal.
pub const DEFAULT_EXCLUDED_DIR: &str = "test";

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational; `None` means the command's own default format
    pub format: Option<String>,
    pub quiet: bool,

    // Targeting
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub respect_gitignore: bool,

    // Extraction rules
    pub java: ResolvedJavaConfig,
    pub python: ResolvedPythonConfig,
    pub calls: ResolvedCallsConfig,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: None,
            quiet: false,
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            excluded_dirs: vec![DEFAULT_EXCLUDED_DIR.to_string()],
            respect_gitignore: false,
            java: ResolvedJavaConfig::default(),
            python: ResolvedPythonConfig::default(),
            calls: ResolvedCallsConfig::default(),
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exclude globs from config plus `.svcmapignore` patterns.
    pub fn exclude_globs(&self) -> Vec<String> {
        let mut globs = self.exclude.clone();
        globs.extend(self.ignore_patterns.iter().cloned());
        globs
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedJavaConfig {
    pub endpoint_annotations: Vec<String>,
    pub entity_markers: Vec<String>,
}

impl Default for ResolvedJavaConfig {
    fn default() -> Self {
        Self {
            endpoint_annotations: to_strings(DEFAULT_ENDPOINT_ANNOTATIONS),
            entity_markers: to_strings(DEFAULT_ENTITY_MARKERS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedPythonConfig {
    pub route_decorators: Vec<String>,
    pub model_base: String,
}

impl Default for ResolvedPythonConfig {
    fn default() -> Self {
        Self {
            route_decorators: to_strings(DEFAULT_ROUTE_DECORATORS),
            model_base: DEFAULT_MODEL_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedCallsConfig {
    pub verbs: Vec<String>,
}

impl Default for ResolvedCallsConfig {
    fn default() -> Self {
        Self {
            verbs: to_strings(DEFAULT_CALL_VERBS),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
