use crate::errors::{Result, SvcmapError};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// Source language whose declarations are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Class-based, annotation-driven (Spring-style controllers and JPA entities).
    Java,
    /// Decorator-driven (Flask/FastAPI-style routes and ORM models).
    Python,
}

impl Language {
    /// File extensions for this language.
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Java => &["java"],
            Language::Python => &["py"],
        }
    }

    /// Classify a path by extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        [Language::Java, Language::Python]
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Java => write!(f, "java"),
            Language::Python => write!(f, "python"),
        }
    }
}

/// Configuration file dialect harvested for service URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigDialect {
    /// Flat `key=value` files.
    Properties,
    /// Nested YAML documents.
    Yaml,
}

impl ConfigDialect {
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigDialect::Properties => &["properties"],
            ConfigDialect::Yaml => &["yml", "yaml"],
        }
    }

    pub fn from_path(path: &Path) -> Option<ConfigDialect> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        [ConfigDialect::Properties, ConfigDialect::Yaml]
            .into_iter()
            .find(|dialect| dialect.extensions().contains(&ext))
    }
}

impl std::fmt::Display for ConfigDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigDialect::Properties => write!(f, "properties"),
            ConfigDialect::Yaml => write!(f, "yaml"),
        }
    }
}

/// A tree of files the scanner can enumerate and read.
///
/// Paths returned by [`SourceTree::files`] are relative to [`SourceTree::root`]
/// and come back in traversal order. That order decides URL-table collision
/// winners and service-context ordering, so implementations must be
/// deterministic.
pub trait SourceTree {
    /// Root directory the relative paths hang off.
    fn root(&self) -> &Path;

    /// Every file under the root, relative to it, in traversal order.
    fn files(&self) -> Vec<PathBuf>;

    /// Read one file in full.
    fn read_to_string(&self, relative: &Path) -> std::io::Result<String>;
}

/// Filesystem-backed tree.
#[derive(Debug, Clone)]
pub struct DiskTree {
    root: PathBuf,
    respect_gitignore: bool,
}

impl DiskTree {
    /// Open `root` for scanning.
    ///
    /// Fails with [`SvcmapError::RootUnreadable`] when the root does not
    /// exist, is not a directory, or cannot be listed.
    pub fn open(root: &Path) -> Result<Self> {
        let unreadable = |message: String| SvcmapError::RootUnreadable {
            path: root.to_path_buf(),
            message,
        };

        let canonical = root.canonicalize().map_err(|e| unreadable(e.to_string()))?;
        if !canonical.is_dir() {
            return Err(unreadable("not a directory".to_string()));
        }
        std::fs::read_dir(&canonical).map_err(|e| unreadable(e.to_string()))?;

        Ok(Self {
            root: canonical,
            respect_gitignore: false,
        })
    }

    /// Skip files matched by `.gitignore` / `.ignore` files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

impl SourceTree for DiskTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn files(&self) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(relative);
        }
        files
    }

    /// Invalid UTF-8 is replaced rather than rejected.
    fn read_to_string(&self, relative: &Path) -> std::io::Result<String> {
        let bytes = std::fs::read(self.root.join(relative))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// In-memory tree with a pinned traversal order (insertion order).
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    root: PathBuf,
    files: Vec<(PathBuf, Option<String>)>,
}

impl MemoryTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// Add a file with the given contents.
    pub fn with_file(mut self, relative: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((relative.into(), Some(contents.into())));
        self
    }

    /// Add a file that is listed but fails to read.
    pub fn with_unreadable(mut self, relative: impl Into<PathBuf>) -> Self {
        self.files.push((relative.into(), None));
        self
    }
}

impl SourceTree for MemoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn files(&self) -> Vec<PathBuf> {
        self.files.iter().map(|(p, _)| p.clone()).collect()
    }

    fn read_to_string(&self, relative: &Path) -> std::io::Result<String> {
        match self.files.iter().find(|(p, _)| p == relative) {
            Some((_, Some(contents))) => Ok(contents.clone()),
            Some((_, None)) => Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )),
        }
    }
}

/// Return the topmost directory of `relative` whose name is one of
/// `excluded`, if any. Everything below that directory is pruned.
pub fn excluded_ancestor(relative: &Path, excluded: &[String]) -> Option<PathBuf> {
    let parent = relative.parent()?;
    let mut prefix = PathBuf::new();
    for component in parent.components() {
        prefix.push(component);
        if let Component::Normal(name) = component {
            let name = name.to_string_lossy();
            if excluded.iter().any(|e| *e == name) {
                return Some(prefix);
            }
        }
    }
    None
}
