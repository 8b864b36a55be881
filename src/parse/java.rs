use crate::parse::common::{
    named_children, node_text, unquote, EndpointFact, EntityFact, Facts, VOID_RETURN,
};
use crate::parse::DeclarationExtractor;
use streaming_iterator::StreamingIterator;

/// Annotations that mark a method as an HTTP endpoint.
pub const DEFAULT_ENDPOINT_ANNOTATIONS: &[&str] = &["GetMapping", "PostMapping", "RequestMapping"];

/// Annotation text fragments that mark a class as persistent.
pub const DEFAULT_ENTITY_MARKERS: &[&str] = &["@Entity", "@Table", "@Document"];

const DECLARATION_QUERY: &str = r#"
(method_declaration) @method
(class_declaration) @class
"#;

const LITERAL_KINDS: &[&str] = &[
    "string_literal",
    "text_block",
    "character_literal",
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
    "true",
    "false",
    "null_literal",
];

/// Extractor for annotation-driven Java controllers and entities.
pub struct JavaExtractor {
    endpoint_annotations: Vec<String>,
    entity_markers: Vec<String>,
}

impl JavaExtractor {
    pub fn new() -> Self {
        Self::with_rules(
            DEFAULT_ENDPOINT_ANNOTATIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ENTITY_MARKERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_rules(endpoint_annotations: Vec<String>, entity_markers: Vec<String>) -> Self {
        Self {
            endpoint_annotations,
            entity_markers,
        }
    }

    fn annotations(node: tree_sitter::Node) -> Vec<tree_sitter::Node> {
        let mut cursor = node.walk();
        let modifiers = node
            .children(&mut cursor)
            .find(|c| c.kind() == "modifiers");
        match modifiers {
            Some(m) => named_children(m)
                .into_iter()
                .filter(|c| matches!(c.kind(), "annotation" | "marker_annotation"))
                .collect(),
            None => Vec::new(),
        }
    }

    fn method_endpoints(&self, method: tree_sitter::Node, source: &[u8], out: &mut Vec<EndpointFact>) {
        for annotation in Self::annotations(method) {
            let name = annotation
                .child_by_field_name("name")
                .map(|n| node_text(n, source))
                .unwrap_or_default();
            if !self.endpoint_annotations.iter().any(|a| a == name) {
                continue;
            }

            let path = annotation
                .child_by_field_name("arguments")
                .map(|args| annotation_path(args, source))
                .unwrap_or_default();

            let return_type = method
                .child_by_field_name("type")
                .map(|t| type_name(t, source))
                .unwrap_or_else(|| VOID_RETURN.to_string());

            let params = method
                .child_by_field_name("parameters")
                .map(|p| parameter_types(p, source))
                .unwrap_or_default();

            out.push(EndpointFact {
                method: name.to_string(),
                path,
                return_type,
                params,
                line: method.start_position().row + 1,
            });
        }
    }

    fn class_entity(&self, class: tree_sitter::Node, source: &[u8]) -> Option<EntityFact> {
        let marked = Self::annotations(class).iter().any(|a| {
            let text = node_text(*a, source);
            self.entity_markers.iter().any(|m| text.contains(m.as_str()))
        });
        if !marked {
            return None;
        }
        let name = class.child_by_field_name("name")?;
        Some(EntityFact {
            name: node_text(name, source).to_string(),
            line: class.start_position().row + 1,
        })
    }
}

impl Default for JavaExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationExtractor for JavaExtractor {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn collect(&self, tree: &tree_sitter::Tree, source: &[u8]) -> Facts {
        let lang = self.language();
        let query = tree_sitter::Query::new(&lang, DECLARATION_QUERY)
            .expect("failed to compile Java declaration query");

        let mut facts = Facts::default();
        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source);
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                match node.kind() {
                    "method_declaration" => {
                        self.method_endpoints(node, source, &mut facts.endpoints)
                    }
                    "class_declaration" => {
                        if let Some(entity) = self.class_entity(node, source) {
                            facts.entities.push(entity);
                        }
                    }
                    _ => {}
                }
            }
        }
        facts
    }

    fn detects_call_sites(&self) -> bool {
        true
    }
}

/// Path value of an annotation's argument list.
///
/// A single literal yields its value; an array initializer yields the
/// comma-joined values of its literal elements. `key = value` pairs
/// contribute nothing.
fn annotation_path(args: tree_sitter::Node, source: &[u8]) -> String {
    let elements = named_children(args);
    if let [single] = elements.as_slice() {
        if is_literal(*single) {
            return literal_value(*single, source);
        }
    }

    let mut values = Vec::new();
    for element in elements {
        if element.kind() != "element_value_pair" {
            collect_literals(element, source, &mut values);
        }
    }
    values.join(", ")
}

fn collect_literals(node: tree_sitter::Node, source: &[u8], out: &mut Vec<String>) {
    if is_literal(node) {
        out.push(literal_value(node, source));
    } else if node.kind() == "element_value_array_initializer" {
        for child in named_children(node) {
            if is_literal(child) {
                out.push(literal_value(child, source));
            }
        }
    }
}

fn is_literal(node: tree_sitter::Node) -> bool {
    LITERAL_KINDS.contains(&node.kind())
}

fn literal_value(node: tree_sitter::Node, source: &[u8]) -> String {
    let text = node_text(node, source);
    match node.kind() {
        "string_literal" | "text_block" => unquote(text, &["\"\"\"", "\""]).to_string(),
        "character_literal" => unquote(text, &["'"]).to_string(),
        _ => text.to_string(),
    }
}

/// Bare type name: generics and array dimensions are dropped.
fn type_name(node: tree_sitter::Node, source: &[u8]) -> String {
    match node.kind() {
        "generic_type" => named_children(node)
            .into_iter()
            .find(|c| c.kind() != "type_arguments")
            .map(|c| type_name(c, source))
            .unwrap_or_else(|| node_text(node, source).to_string()),
        "array_type" => node
            .child_by_field_name("element")
            .map(|e| type_name(e, source))
            .unwrap_or_else(|| node_text(node, source).to_string()),
        _ => node_text(node, source).to_string(),
    }
}

fn parameter_types(params: tree_sitter::Node, source: &[u8]) -> Vec<String> {
    named_children(params)
        .into_iter()
        .filter_map(|param| match param.kind() {
            "formal_parameter" => param.child_by_field_name("type"),
            "spread_parameter" => named_children(param)
                .into_iter()
                .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator")),
            _ => None,
        })
        .map(|t| type_name(t, source))
        .collect()
}
