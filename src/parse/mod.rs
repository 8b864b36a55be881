pub mod common;
pub mod factory;
pub mod java;
pub mod python;
pub mod rest_client;

pub use common::{EndpointFact, EntityFact, Facts};

use crate::errors::SvcmapError;
use std::path::Path;

/// Outcome of extracting one source unit.
///
/// Extraction fails closed: on a syntax error `facts` is empty and
/// `failure` carries the diagnostic, which has already been logged.
#[derive(Debug, Default)]
pub struct Extraction {
    pub facts: Facts,
    pub failure: Option<SvcmapError>,
}

/// Declaration extractor; each source language implements this.
pub trait DeclarationExtractor {
    /// Return the tree-sitter Language for this extractor.
    fn language(&self) -> tree_sitter::Language;

    /// Collect endpoint and entity facts from an error-free syntax tree.
    fn collect(&self, tree: &tree_sitter::Tree, source: &[u8]) -> Facts;

    /// Whether outbound call sites are detected in this language's files.
    fn detects_call_sites(&self) -> bool {
        false
    }

    /// Parse `source` and extract its facts.
    fn extract(&self, source: &[u8], file_path: &Path) -> Extraction {
        match parse_clean(self.language(), source) {
            Ok(tree) => Extraction {
                facts: self.collect(&tree, source),
                failure: None,
            },
            Err(message) => {
                tracing::warn!("Syntax error in {}. Skipping: {}", file_path.display(), message);
                Extraction {
                    facts: Facts::default(),
                    failure: Some(SvcmapError::SyntaxFailure {
                        file: file_path.to_path_buf(),
                        message,
                    }),
                }
            }
        }
    }
}

/// Parse `source`, rejecting trees that contain any syntax error.
fn parse_clean(
    language: tree_sitter::Language,
    source: &[u8],
) -> std::result::Result<tree_sitter::Tree, String> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| format!("grammar unavailable: {e}"))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| "parser produced no tree".to_string())?;

    let root = tree.root_node();
    if root.has_error() {
        let pos = common::first_error(root).unwrap_or(root).start_position();
        return Err(format!(
            "unexpected syntax at line {}, column {}",
            pos.row + 1,
            pos.column + 1
        ));
    }
    Ok(tree)
}
