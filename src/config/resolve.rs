use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{Result, SvcmapError};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/svcmap/config.toml)
/// 3. Project config (nearest .svcmap.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_with_user_config(working_dir, find_user_config().as_deref(), cli)
}

fn resolve_with_user_config(
    working_dir: &Path,
    user_config: Option<&Path>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::with_defaults();
    let mut loaded_files = Vec::new();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file(path, "user")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::UserConfig(path.to_path_buf()),
            &mut prov,
        );
        loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file(&path, "project")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        );
        loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov);
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = crate::config::ignore::load_svcmapignore(working_dir);
    config.provenance = prov;
    config.loaded_files = loaded_files;

    Ok(config)
}

fn load_file(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        SvcmapError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| SvcmapError::Config(format!("Invalid {layer} config {}: {e}", path.display())))
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("svcmap").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(".svcmap.toml");
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) {
    if let Some(ref format) = file.defaults.format {
        config.format = Some(format.clone());
        prov.set("defaults.format", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }

    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }
    if let Some(ref dirs) = file.targeting.excluded_dirs {
        config.excluded_dirs = dirs.clone();
        prov.set("targeting.excluded_dirs", source.clone());
    }
    if let Some(respect) = file.targeting.respect_gitignore {
        config.respect_gitignore = respect;
        prov.set("targeting.respect_gitignore", source.clone());
    }

    if let Some(ref annotations) = file.java.endpoint_annotations {
        config.java.endpoint_annotations = annotations.clone();
        prov.set("java.endpoint_annotations", source.clone());
    }
    if let Some(ref markers) = file.java.entity_markers {
        config.java.entity_markers = markers.clone();
        prov.set("java.entity_markers", source.clone());
    }

    if let Some(ref decorators) = file.python.route_decorators {
        config.python.route_decorators = decorators.clone();
        prov.set("python.route_decorators", source.clone());
    }
    if let Some(ref base) = file.python.model_base {
        config.python.model_base = base.clone();
        prov.set("python.model_base", source.clone());
    }

    if let Some(ref verbs) = file.calls.verbs {
        config.calls.verbs = verbs.clone();
        prov.set("calls.verbs", source);
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) {
    if let Ok(val) = std::env::var("SVCMAP_FORMAT") {
        config.format = Some(val);
        prov.set("defaults.format", Source::EnvVar("SVCMAP_FORMAT".into()));
    }
    if let Ok(val) = std::env::var("SVCMAP_QUIET") {
        config.quiet = val == "1" || val.eq_ignore_ascii_case("true");
        prov.set("defaults.quiet", Source::EnvVar("SVCMAP_QUIET".into()));
    }
    if let Ok(val) = std::env::var("SVCMAP_EXCLUDE") {
        config.exclude = split_list(&val);
        prov.set("targeting.exclude", Source::EnvVar("SVCMAP_EXCLUDE".into()));
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = Some(format.to_string());
        prov.set("defaults.format", Source::CliFlag("--format".into()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet".into()));
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.iter().cloned());
        prov.set("targeting.exclude", Source::CliFlag("--exclude".into()));
    }
    if cli.respect_gitignore {
        config.respect_gitignore = true;
        prov.set(
            "targeting.respect_gitignore",
            Source::CliFlag("--respect-gitignore".into()),
        );
    }
}
