pub mod properties;
pub mod yaml;

use crate::errors::SvcmapError;
use crate::walk::{ConfigDialect, SourceTree};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One configuration key mentioning "url".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlTableEntry {
    pub key: String,
    pub value: String,
    pub format: ConfigDialect,
    /// Config file (relative to the scan root) that supplied the value
    pub source: PathBuf,
}

/// Flat, global key → URL table.
///
/// Inserting an existing key replaces its value in place, so iteration
/// order is the order in which each key was first seen.
#[derive(Debug, Clone, Default)]
pub struct UrlTable {
    entries: Vec<UrlTableEntry>,
    index: HashMap<String, usize>,
}

impl UrlTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: UrlTableEntry) {
        match self.index.get(&entry.key) {
            Some(&idx) => self.entries[idx] = entry,
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&UrlTableEntry> {
        self.index.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &UrlTableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key of the first entry whose value occurs anywhere in `text`.
    /// An empty value occurs in every text.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| text.contains(e.value.as_str()))
            .map(|e| e.key.as_str())
    }
}

impl Serialize for UrlTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

/// Result of harvesting URL keys from every config file under a root.
#[derive(Debug, Default)]
pub struct ConfigScan {
    pub table: UrlTable,
    pub files_read: usize,
    pub files_failed: usize,
}

fn is_url_key(key: &str) -> bool {
    key.to_lowercase().contains("url")
}

/// Pairs from one config file whose key mentions "url".
pub fn harvest_file(
    dialect: ConfigDialect,
    text: &str,
    path: &Path,
) -> Result<Vec<(String, String)>, SvcmapError> {
    let to_error = |message: String| SvcmapError::ConfigParse {
        file: path.to_path_buf(),
        message,
    };
    let pairs = match dialect {
        ConfigDialect::Properties => {
            properties::default_section(text).map_err(|e| to_error(e.to_string()))?
        }
        ConfigDialect::Yaml => yaml::top_level(text).map_err(to_error)?,
    };
    Ok(pairs.into_iter().filter(|(k, _)| is_url_key(k)).collect())
}

/// Build the URL table from every config file under the tree's root.
///
/// Service boundaries and excluded directories are ignored here. Malformed
/// or unreadable files are logged and skipped. When two files define the
/// same key, the one visited later wins.
pub fn build_url_table(tree: &dyn SourceTree) -> ConfigScan {
    let mut scan = ConfigScan::default();

    for relative in tree.files() {
        let Some(dialect) = ConfigDialect::from_path(&relative) else {
            continue;
        };
        let full_path = tree.root().join(&relative);

        let text = match tree.read_to_string(&relative) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", full_path.display(), e);
                scan.files_failed += 1;
                continue;
            }
        };

        match harvest_file(dialect, &text, &full_path) {
            Ok(pairs) => {
                scan.files_read += 1;
                for (key, value) in pairs {
                    tracing::debug!("URL key {} = {} ({})", key, value, relative.display());
                    scan.table.insert(UrlTableEntry {
                        key,
                        value,
                        format: dialect,
                        source: relative.clone(),
                    });
                }
            }
            Err(e) => {
                tracing::warn!("{e}");
                scan.files_failed += 1;
            }
        }
    }

    scan
}
