use std::path::Path;

/// Load `.svcmapignore` by walking up from the given directory.
/// Each non-blank, non-comment line is a glob relative to the scan root.
pub fn load_svcmapignore(start: &Path) -> Vec<String> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(".svcmapignore");
        if ignore_path.is_file() {
            match std::fs::read_to_string(&ignore_path) {
                Ok(content) => return parse_ignore_patterns(&content),
                Err(e) => tracing::warn!("Error reading {}: {}", ignore_path.display(), e),
            }
        }
        if !dir.pop() {
            break;
        }
    }
    Vec::new()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
