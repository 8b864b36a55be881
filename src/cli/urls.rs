use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::Result;
use crate::output::OutputFormat;
use crate::urls::build_url_table;
use crate::walk::{DiskTree, SourceTree};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UrlsArgs {
    /// Root directory of the codebase
    pub path: PathBuf,

    /// Output format (text or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Skip files matched by .gitignore / .ignore
    #[arg(long)]
    pub respect_gitignore: bool,
}

pub fn run(args: &UrlsArgs) -> Result<()> {
    let tree = DiskTree::open(&args.path)?;
    let overrides = CliOverrides {
        format: args.format,
        respect_gitignore: args.respect_gitignore,
        ..Default::default()
    };
    let config = resolve_config(tree.root(), &overrides)?;
    let tree = tree.with_gitignore(config.respect_gitignore);

    let format = super::select_format(
        "urls",
        args.format,
        &config,
        &[OutputFormat::Text, OutputFormat::Json],
        OutputFormat::Text,
    )?;

    let scan = build_url_table(&tree);
    tracing::info!(
        "Read {} config files ({} failed), {} URL keys",
        scan.files_read,
        scan.files_failed,
        scan.table.len()
    );

    let mut stdout = std::io::stdout();
    match format {
        OutputFormat::Json => crate::output::json::write_urls_json(&mut stdout, &scan.table)?,
        _ => crate::output::text::write_urls_text(&mut stdout, &scan.table)?,
    }

    Ok(())
}
