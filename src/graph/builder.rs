use crate::graph::ir::{CallEdge, NodeId, ServiceGraph, ServiceNode};
use crate::service::{ContextMap, DependencyEdge};
use petgraph::Direction;
use std::collections::HashMap;

/// Base unit of the degree-based node size hint.
pub const SIZE_UNIT: usize = 3000;

/// Fill colour for every service node.
pub const NODE_COLOR: &str = "lightgreen";

/// Edge colour for labels outside the palette.
pub const DEFAULT_EDGE_COLOR: &str = "black";

/// Verb label to edge colour.
pub const EDGE_PALETTE: &[(&str, &str)] = &[
    ("get", "blue"),
    ("post", "green"),
    ("put", "orange"),
    ("delete", "red"),
];

/// Builds a ServiceGraph with node deduplication.
///
/// Edges are never merged: every call site is its own parallel edge, so
/// node degree counts detected calls rather than distinct neighbours.
pub struct GraphBuilder {
    graph: ServiceGraph,
    node_map: HashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: ServiceGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Get or create the node for a service name.
    pub fn ensure_node(&mut self, name: &str) -> NodeId {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(ServiceNode {
            name: name.to_string(),
        });
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    pub fn add_dependency(&mut self, dep: &DependencyEdge) {
        let caller = self.ensure_node(&dep.caller);
        let callee = self.ensure_node(&dep.callee);
        self.graph.add_edge(
            caller,
            callee,
            CallEdge {
                label: dep.label.clone(),
            },
        );
    }

    /// Consume the builder and return the built graph.
    pub fn build(self) -> ServiceGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Graph over every service with a context plus every edge endpoint.
pub fn build_service_graph(contexts: &ContextMap, deps: &[DependencyEdge]) -> ServiceGraph {
    let mut builder = GraphBuilder::new();
    for name in contexts.names() {
        builder.ensure_node(name);
    }
    for dep in deps {
        builder.add_dependency(dep);
    }
    builder.build()
}

/// Total in + out degree, counting parallel edges.
pub fn degree(graph: &ServiceGraph, node: NodeId) -> usize {
    graph.edges_directed(node, Direction::Outgoing).count()
        + graph.edges_directed(node, Direction::Incoming).count()
}

/// Rendering size hint for a node: `SIZE_UNIT * (degree + 1)`.
pub fn size_hint(graph: &ServiceGraph, node: NodeId) -> usize {
    SIZE_UNIT * (degree(graph, node) + 1)
}

/// Palette colour for a verb label, matched case-insensitively.
pub fn edge_color(label: &str) -> &'static str {
    let label = label.to_lowercase();
    EDGE_PALETTE
        .iter()
        .find(|(verb, _)| *verb == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_EDGE_COLOR)
}
