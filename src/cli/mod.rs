pub mod config;
pub mod graph;
pub mod scan;
pub mod urls;

use crate::config::ResolvedConfig;
use crate::errors::{Result, SvcmapError};
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "svcmap",
    version,
    about = "Static service-dependency mapper for Java and Python microservices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a source tree for endpoints, entities and cross-service calls
    Scan(scan::ScanArgs),
    /// Export the service dependency graph
    Graph(graph::GraphArgs),
    /// List URL keys harvested from configuration files
    Urls(urls::UrlsArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan(args) => scan::run(&args),
        Commands::Graph(args) => graph::run(&args),
        Commands::Urls(args) => urls::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}

/// Pick the output format for a command.
///
/// An explicit `--format` the command cannot render is an error. A format
/// inherited from config files or the environment that the command cannot
/// render falls back to the command's default.
pub(crate) fn select_format(
    command: &str,
    flag: Option<OutputFormat>,
    config: &ResolvedConfig,
    supported: &[OutputFormat],
    default: OutputFormat,
) -> Result<OutputFormat> {
    if let Some(format) = flag {
        if supported.contains(&format) {
            return Ok(format);
        }
        return Err(SvcmapError::Config(format!(
            "{format} format is not supported for {command}"
        )));
    }

    let Some(ref configured) = config.format else {
        return Ok(default);
    };
    match configured.parse::<OutputFormat>() {
        Ok(format) if supported.contains(&format) => Ok(format),
        _ => {
            tracing::debug!(
                "Configured format {} not usable for {}; using {}",
                configured,
                command,
                default
            );
            Ok(default)
        }
    }
}
