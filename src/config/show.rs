use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }

    if !config.ignore_patterns.is_empty() {
        writeln!(w)?;
        writeln!(w, ".svcmapignore patterns:")?;
        for pattern in &config.ignore_patterns {
            writeln!(w, "  {}", pattern)?;
        }
    }

    Ok(())
}

fn value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.format" => config
            .format
            .clone()
            .unwrap_or_else(|| "(command default)".to_string()),
        "defaults.quiet" => config.quiet.to_string(),
        "targeting.exclude" => format!("{:?}", config.exclude),
        "targeting.excluded_dirs" => format!("{:?}", config.excluded_dirs),
        "targeting.respect_gitignore" => config.respect_gitignore.to_string(),
        "java.endpoint_annotations" => format!("{:?}", config.java.endpoint_annotations),
        "java.entity_markers" => format!("{:?}", config.java.entity_markers),
        "python.route_decorators" => format!("{:?}", config.python.route_decorators),
        "python.model_base" => config.python.model_base.clone(),
        "calls.verbs" => format!("{:?}", config.calls.verbs),
        _ => "(unknown)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::provenance::{ProvenanceMap, Source};
    use std::path::PathBuf;

    fn make_test_config() -> ResolvedConfig {
        let mut prov = ProvenanceMap::with_defaults();
        prov.set(
            "calls.verbs",
            Source::ProjectConfig(PathBuf::from("/project/.svcmap.toml")),
        );
        let mut config = ResolvedConfig {
            provenance: prov,
            loaded_files: vec![PathBuf::from("/project/.svcmap.toml")],
            ..Default::default()
        };
        config.calls.verbs = vec!["get".to_string()];
        config
    }

    fn render(config: &ResolvedConfig) -> String {
        let mut buf = Vec::new();
        render_show(&mut buf, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn render_show_format() {
        let output = render(&make_test_config());
        assert!(output.contains("Loaded config files:\n  1. /project/.svcmap.toml"));
        assert!(output.contains("Resolved settings:"));
        assert!(output.contains("defaults.format: (command default) <- default"));
        assert!(output.contains(
            "calls.verbs: [\"get\"] <- project config (/project/.svcmap.toml)"
        ));
        assert!(output.contains("python.model_base: Model <- default"));
    }

    #[test]
    fn render_show_no_files() {
        let mut config = make_test_config();
        config.loaded_files.clear();
        assert!(render(&config).contains("Loaded config files: (none)"));
    }

    #[test]
    fn render_show_lists_ignore_patterns() {
        let mut config = make_test_config();
        config.ignore_patterns = vec!["legacy/**".to_string()];
        assert!(render(&config).contains(".svcmapignore patterns:\n  legacy/**"));
    }
}
