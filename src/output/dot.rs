use crate::errors::Result;
use crate::graph::builder::{
    edge_color, size_hint, DEFAULT_EDGE_COLOR, EDGE_PALETTE, NODE_COLOR, SIZE_UNIT,
};
use crate::graph::ir::ServiceGraph;
use petgraph::visit::EdgeRef;
use std::io::Write;

/// Write the service graph in Graphviz DOT format.
///
/// Node `width` scales with the size hint so heavily connected services
/// render larger; edges are coloured by verb and a legend lists the palette.
pub fn write_dot<W: Write>(writer: &mut W, graph: &ServiceGraph) -> Result<()> {
    writeln!(writer, "digraph service_dependencies {{")?;
    writeln!(writer, "    label=\"Microservices Dependency Graph\";")?;
    writeln!(writer, "    labelloc=t;")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(
        writer,
        "    node [shape=ellipse, style=filled, fillcolor={}, fontsize=10];",
        NODE_COLOR
    )?;
    writeln!(writer)?;

    for idx in graph.node_indices() {
        let name = escape(&graph[idx].name);
        let size = size_hint(graph, idx);
        writeln!(
            writer,
            "    \"{}\" [size_hint={}, width={:.2}];",
            name,
            size,
            size as f64 / SIZE_UNIT as f64
        )?;
    }
    writeln!(writer)?;

    for edge in graph.edge_references() {
        let label = &edge.weight().label;
        writeln!(
            writer,
            "    \"{}\" -> \"{}\" [label=\"{}\", color={}, fontcolor=red];",
            escape(&graph[edge.source()].name),
            escape(&graph[edge.target()].name),
            escape(label),
            edge_color(label)
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "    subgraph cluster_legend {{")?;
    writeln!(writer, "        label=\"HTTP Methods\";")?;
    writeln!(writer, "        node [shape=plaintext, style=\"\"];")?;
    let mut legend: Vec<(&str, &str)> = EDGE_PALETTE.to_vec();
    legend.push(("other", DEFAULT_EDGE_COLOR));
    for (verb, color) in legend {
        writeln!(
            writer,
            "        \"legend_{verb}\" [label=\"{verb}\", fontcolor={color}];"
        )?;
    }
    writeln!(writer, "    }}")?;

    writeln!(writer, "}}")?;
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
