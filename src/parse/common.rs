use serde::Serialize;

/// Return type recorded for Java methods without a declared type.
pub const VOID_RETURN: &str = "void";

/// Return type recorded when no static type is available.
pub const UNKNOWN_RETURN: &str = "unknown";

/// One discovered API route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointFact {
    /// Annotation name (`GetMapping`) or upper-cased decorator name (`ROUTE`)
    pub method: String,
    /// Path template; multi-valued paths are joined with `", "`
    pub path: String,
    pub return_type: String,
    /// Parameter types (Java) or parameter names (Python), in declaration order
    pub params: Vec<String>,
    /// Line of the declaration (1-indexed)
    pub line: usize,
}

/// One discovered persistent/data class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityFact {
    pub name: String,
    pub line: usize,
}

/// Declarations extracted from a single source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    pub endpoints: Vec<EndpointFact>,
    pub entities: Vec<EntityFact>,
}

impl Facts {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.entities.is_empty()
    }
}

/// Text of a node, or an empty string for invalid UTF-8.
pub fn node_text<'a>(node: tree_sitter::Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

/// Named children of `node`, skipping comments.
pub fn named_children(node: tree_sitter::Node) -> Vec<tree_sitter::Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.kind().contains("comment"))
        .collect()
}

/// Locate the first ERROR or MISSING node, descending only into subtrees
/// that contain one.
pub fn first_error(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Strip matching quote delimiters from a string literal's source text.
pub fn unquote<'a>(text: &'a str, delimiters: &[&str]) -> &'a str {
    for delim in delimiters {
        if text.len() >= 2 * delim.len() && text.starts_with(delim) && text.ends_with(delim) {
            return &text[delim.len()..text.len() - delim.len()];
        }
    }
    text
}
