use crate::errors::Result;
use crate::graph::builder::{edge_color, size_hint, NODE_COLOR};
use crate::graph::ir::ServiceGraph;
use crate::scan::{ScanResult, ScanStats};
use crate::service::{ContextMap, DependencyEdge};
use crate::urls::UrlTable;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ScanOutput<'a> {
    pub root: &'a Path,
    pub stats: &'a ScanStats,
    pub summary: Summary,
    pub url_table: &'a UrlTable,
    pub dependencies: &'a [DependencyEdge],
    pub contexts: &'a ContextMap,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub services: usize,
    pub dependencies: usize,
    pub endpoints: usize,
    pub entities: usize,
    pub url_keys: usize,
}

impl Summary {
    pub fn of(result: &ScanResult) -> Self {
        Self {
            services: result.contexts.len(),
            dependencies: result.dependencies.len(),
            endpoints: result.contexts.total_endpoints(),
            entities: result.contexts.total_entities(),
            url_keys: result.url_table.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<GraphNodeOutput>,
    pub edges: Vec<GraphEdgeOutput>,
}

#[derive(Debug, Serialize)]
pub struct GraphNodeOutput {
    pub name: String,
    pub size: usize,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GraphEdgeOutput {
    pub from: String,
    pub to: String,
    pub label: String,
    pub color: &'static str,
}

impl GraphOutput {
    pub fn from_graph(graph: &ServiceGraph) -> Self {
        let nodes = graph
            .node_indices()
            .map(|idx| GraphNodeOutput {
                name: graph[idx].name.clone(),
                size: size_hint(graph, idx),
                color: NODE_COLOR,
            })
            .collect();
        let edges = graph
            .edge_references()
            .map(|e| GraphEdgeOutput {
                from: graph[e.source()].name.clone(),
                to: graph[e.target()].name.clone(),
                label: e.weight().label.clone(),
                color: edge_color(&e.weight().label),
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Write full scan output as JSON.
pub fn write_scan_json<W: Write>(writer: &mut W, root: &Path, result: &ScanResult) -> Result<()> {
    let output = ScanOutput {
        root,
        stats: &result.stats,
        summary: Summary::of(result),
        url_table: &result.url_table,
        dependencies: &result.dependencies,
        contexts: &result.contexts,
    };
    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the service graph as JSON nodes and edges.
pub fn write_graph_json<W: Write>(writer: &mut W, graph: &ServiceGraph) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &GraphOutput::from_graph(graph))?;
    writeln!(writer)?;
    Ok(())
}

/// Write the URL table as a JSON array in table order.
pub fn write_urls_json<W: Write>(writer: &mut W, table: &UrlTable) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, table)?;
    writeln!(writer)?;
    Ok(())
}
