use petgraph::graph::DiGraph;
use serde::Serialize;

/// Unique identifier for a graph node
pub type NodeId = petgraph::graph::NodeIndex;

/// The service dependency graph
pub type ServiceGraph = DiGraph<ServiceNode, CallEdge>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceNode {
    /// Service name, or a URL-table key for callees
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEdge {
    /// Verb text of the call site that produced this edge
    pub label: String,
}
