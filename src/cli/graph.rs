use crate::config::resolve::CliOverrides;
use crate::errors::Result;
use crate::graph::builder::build_service_graph;
use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Root directory of the codebase
    pub path: PathBuf,

    /// Output format (dot or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Exclude glob patterns (source files only)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,

    /// Skip files matched by .gitignore / .ignore
    #[arg(long)]
    pub respect_gitignore: bool,
}

impl GraphArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            quiet: self.quiet,
            exclude: self.exclude.clone(),
            respect_gitignore: self.respect_gitignore,
        }
    }
}

pub fn run(args: &GraphArgs) -> Result<()> {
    let overrides = args.to_cli_overrides();
    let (_, config, result) = super::scan::scan_tree(&args.path, &overrides)?;

    let format = super::select_format(
        "graph",
        args.format,
        &config,
        &[OutputFormat::Dot, OutputFormat::Json],
        OutputFormat::Dot,
    )?;

    let graph = build_service_graph(&result.contexts, &result.dependencies);
    tracing::info!(
        "Service graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut stdout = std::io::stdout();
    match format {
        OutputFormat::Json => crate::output::json::write_graph_json(&mut stdout, &graph)?,
        _ => crate::output::dot::write_dot(&mut stdout, &graph)?,
    }

    Ok(())
}
