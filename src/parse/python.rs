use crate::parse::common::{
    named_children, node_text, EndpointFact, EntityFact, Facts, UNKNOWN_RETURN,
};
use crate::parse::DeclarationExtractor;

/// Decorator attribute names that mark a function as a route.
pub const DEFAULT_ROUTE_DECORATORS: &[&str] = &["route", "get", "post"];

/// Base-class name that marks a class as an ORM model.
pub const DEFAULT_MODEL_BASE: &str = "Model";

/// Extractor for decorator-driven Python routes and models.
pub struct PythonExtractor {
    route_decorators: Vec<String>,
    model_base: String,
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self::with_rules(
            DEFAULT_ROUTE_DECORATORS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MODEL_BASE.to_string(),
        )
    }

    pub fn with_rules(route_decorators: Vec<String>, model_base: String) -> Self {
        Self {
            route_decorators,
            model_base,
        }
    }

    fn walk(&self, node: tree_sitter::Node, source: &[u8], facts: &mut Facts) {
        match node.kind() {
            "decorated_definition" => self.decorated(node, source, facts),
            "class_definition" => {
                if let Some(entity) = self.class_entity(node, source) {
                    facts.entities.push(entity);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, source, facts);
        }
    }

    fn decorated(&self, node: tree_sitter::Node, source: &[u8], facts: &mut Facts) {
        let Some(function) = node
            .child_by_field_name("definition")
            .filter(|d| d.kind() == "function_definition")
        else {
            return;
        };

        for decorator in named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "decorator")
        {
            let Some(call) = named_children(decorator)
                .into_iter()
                .next()
                .filter(|e| e.kind() == "call")
            else {
                continue;
            };
            let Some(attribute) = call
                .child_by_field_name("function")
                .filter(|f| f.kind() == "attribute")
                .and_then(|f| f.child_by_field_name("attribute"))
            else {
                continue;
            };

            let verb = node_text(attribute, source);
            if !self.route_decorators.iter().any(|d| d == verb) {
                continue;
            }

            let path = call
                .child_by_field_name("arguments")
                .and_then(first_positional)
                .map(|arg| literal_value(arg, source))
                .unwrap_or_default();

            let params = function
                .child_by_field_name("parameters")
                .map(|p| parameter_names(p, source))
                .unwrap_or_default();

            facts.endpoints.push(EndpointFact {
                method: verb.to_uppercase(),
                path,
                return_type: UNKNOWN_RETURN.to_string(),
                params,
                line: function.start_position().row + 1,
            });
        }
    }

    fn class_entity(&self, class: tree_sitter::Node, source: &[u8]) -> Option<EntityFact> {
        let bases = class.child_by_field_name("superclasses")?;
        let is_model = named_children(bases)
            .into_iter()
            .any(|b| b.kind() == "identifier" && node_text(b, source) == self.model_base);
        if !is_model {
            return None;
        }
        let name = class.child_by_field_name("name")?;
        Some(EntityFact {
            name: node_text(name, source).to_string(),
            line: class.start_position().row + 1,
        })
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationExtractor for PythonExtractor {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn collect(&self, tree: &tree_sitter::Tree, source: &[u8]) -> Facts {
        let mut facts = Facts::default();
        self.walk(tree.root_node(), source, &mut facts);
        facts
    }
}

fn first_positional(args: tree_sitter::Node) -> Option<tree_sitter::Node> {
    named_children(args)
        .into_iter()
        .find(|a| !matches!(a.kind(), "keyword_argument" | "dictionary_splat"))
}

/// Value of a literal argument, or an empty string for anything dynamic.
fn literal_value(node: tree_sitter::Node, source: &[u8]) -> String {
    match node.kind() {
        "string" => string_content(node, source).unwrap_or_default(),
        "concatenated_string" => {
            let parts: Option<Vec<String>> = named_children(node)
                .into_iter()
                .map(|s| string_content(s, source))
                .collect();
            parts.map(|p| p.concat()).unwrap_or_default()
        }
        "integer" | "float" | "true" | "false" | "none" => node_text(node, source).to_string(),
        _ => String::new(),
    }
}

/// Contents of a plain string literal; `None` for interpolated f-strings.
fn string_content(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    let mut content = String::new();
    for child in named_children(node) {
        match child.kind() {
            "string_content" | "escape_sequence" => content.push_str(node_text(child, source)),
            "interpolation" => return None,
            _ => {}
        }
    }
    Some(content)
}

/// Names of positional parameters, stopping at `*`, `*args` or `**kwargs`.
fn parameter_names(params: tree_sitter::Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    for param in named_children(params) {
        let name = match param.kind() {
            "identifier" => Some(param),
            "typed_parameter" => match named_children(param).into_iter().next() {
                Some(first) if first.kind() == "identifier" => Some(first),
                _ => break,
            },
            "default_parameter" | "typed_default_parameter" => param.child_by_field_name("name"),
            "positional_separator" => {
                names.clear();
                continue;
            }
            _ => break,
        };
        if let Some(n) = name {
            names.push(node_text(n, source).to_string());
        }
    }
    names
}
