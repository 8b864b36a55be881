use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(String),
    CliFlag(String),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({})", name),
            Source::CliFlag(name) => write!(f, "CLI flag ({})", name),
        }
    }
}

/// Every dotted key `config show` reports, in display order.
pub const TRACKED_KEYS: &[&str] = &[
    "defaults.format",
    "defaults.quiet",
    "targeting.exclude",
    "targeting.excluded_dirs",
    "targeting.respect_gitignore",
    "java.endpoint_annotations",
    "java.entity_markers",
    "python.route_decorators",
    "python.model_base",
    "calls.verbs",
];

/// Last writer of each dotted configuration key.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceMap {
    entries: BTreeMap<String, Source>,
}

impl ProvenanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every tracked key attributed to the built-in defaults.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for key in TRACKED_KEYS {
            map.set(*key, Source::Default);
        }
        map
    }

    pub fn set(&mut self, key: impl Into<String>, source: Source) {
        self.entries.insert(key.into(), source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.entries.get(key)
    }

    /// Entries sorted by key.
    pub fn sorted_entries(&self) -> Vec<(&str, &Source)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}
