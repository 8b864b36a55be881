use crate::parse::common::{EndpointFact, EntityFact};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::{Component, Path};

/// Callee recorded when no URL-table entry matches a caller's source.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Service name for files too shallow to have a grandparent directory.
pub const ROOT_SERVICE: &str = "(root)";

/// Derive the owning service of a file.
///
/// The service is the directory enclosing the file's immediate parent:
/// `/repo/orders/src/Main.java` belongs to `orders`, `/repo/users/app.py`
/// belongs to `repo`.
pub fn service_name(path: &Path) -> String {
    let segments: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect();

    if segments.len() < 3 {
        return ROOT_SERVICE.to_string();
    }
    segments[segments.len() - 3].to_string_lossy().into_owned()
}

/// Aggregated facts for one service.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ServiceContext {
    #[serde(skip)]
    pub name: String,
    pub endpoints: Vec<EndpointFact>,
    pub entities: Vec<EntityFact>,
}

impl ServiceContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
            entities: Vec::new(),
        }
    }
}

/// Service contexts keyed by name, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct ContextMap {
    contexts: Vec<ServiceContext>,
    index: HashMap<String, usize>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the context for `name`, creating it on first use.
    pub fn entry(&mut self, name: &str) -> &mut ServiceContext {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.contexts.push(ServiceContext::new(name));
                let idx = self.contexts.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.contexts[idx]
    }

    pub fn get(&self, name: &str) -> Option<&ServiceContext> {
        self.index.get(name).map(|&idx| &self.contexts[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceContext> {
        self.contexts.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn total_endpoints(&self) -> usize {
        self.contexts.iter().map(|c| c.endpoints.len()).sum()
    }

    pub fn total_entities(&self) -> usize {
        self.contexts.iter().map(|c| c.entities.len()).sum()
    }
}

impl Serialize for ContextMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.contexts.len()))?;
        for ctx in &self.contexts {
            map.serialize_entry(&ctx.name, ctx)?;
        }
        map.end()
    }
}

/// A caller-to-callee relationship inferred from one call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub caller: String,
    pub callee: String,
    /// Verb text as matched in the caller's source.
    pub label: String,
}
