use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::output::OutputFormat;
use crate::scan::{ScanResult, Scanner};
use crate::walk::{DiskTree, SourceTree};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directory of the codebase
    pub path: PathBuf,

    /// Output format (json, text, dot)
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

impl ScanArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            quiet: self.quiet,
            exclude: self.exclude.clone(),
            respect_gitignore: self.respect_gitignore,
        }
    }
}

/// Open the root, resolve configuration from it, and run the scanner.
pub(crate) fn scan_tree(
    path: &std::path::Path,
    overrides: &CliOverrides,
) -> Result<(DiskTree, ResolvedConfig, ScanResult)> {
    let tree = DiskTree::open(path)?;
    let config = resolve_config(tree.root(), overrides)?;
    let tree = tree.with_gitignore(config.respect_gitignore);

    let scanner = Scanner::from_config(&config)?.with_progress(!config.quiet);
    let result = scanner.run(&tree);
    Ok((tree, config, result))
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let overrides = args.to_cli_overrides();
    let (tree, config, result) = scan_tree(&args.path, &overrides)?;

    let format = super::select_format(
        "scan",
        args.format,
        &config,
        &[OutputFormat::Json, OutputFormat::Text, OutputFormat::Dot],
        OutputFormat::Json,
    )?;

    let mut stdout = std::io::stdout();
    match format {
        OutputFormat::Json => {
            crate::output::json::write_scan_json(&mut stdout, tree.root(), &result)?
        }
        OutputFormat::Text => {
            crate::output::text::write_scan_text(&mut stdout, tree.root(), &result)?
        }
        OutputFormat::Dot => {
            let graph =
                crate::graph::builder::build_service_graph(&result.contexts, &result.dependencies);
            crate::output::dot::write_dot(&mut stdout, &graph)?
        }
    }

    Ok(())
}
