use crate::errors::Result;
use crate::scan::ScanResult;
use crate::urls::UrlTable;
use std::io::Write;
use std::path::Path;

/// Write scan output as a human-readable summary.
pub fn write_scan_text<W: Write>(writer: &mut W, root: &Path, result: &ScanResult) -> Result<()> {
    let stats = &result.stats;

    writeln!(writer, "Service Dependency Scan")?;
    writeln!(writer, "=======================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:       {}", root.display())?;
    writeln!(
        writer,
        "Files:      {} visited ({} java, {} python)",
        stats.files_visited, stats.java_files, stats.python_files
    )?;
    writeln!(
        writer,
        "Skipped:    {} syntax, {} unreadable, {} excluded subtrees",
        stats.files_skipped_syntax, stats.files_skipped_io, stats.subtrees_pruned
    )?;
    writeln!(
        writer,
        "Config:     {} files read, {} failed, {} URL keys",
        stats.config_files,
        stats.config_files_failed,
        result.url_table.len()
    )?;
    writeln!(writer)?;

    writeln!(writer, "=== Summary ===")?;
    writeln!(
        writer,
        "Total detected dependencies: {}",
        result.dependencies.len()
    )?;
    writeln!(
        writer,
        "Total detected entities: {}",
        result.contexts.total_entities()
    )?;

    if !result.dependencies.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Dependencies")?;
        writeln!(writer, "{:-<60}", "")?;
        for dep in &result.dependencies {
            writeln!(writer, "  {} -> {} [{}]", dep.caller, dep.callee, dep.label)?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Context Maps")?;
    writeln!(writer, "{:-<60}", "")?;
    for ctx in result.contexts.iter() {
        writeln!(
            writer,
            "{} ({} endpoints, {} entities)",
            ctx.name,
            ctx.endpoints.len(),
            ctx.entities.len()
        )?;
        for ep in &ctx.endpoints {
            let path = if ep.path.is_empty() { "-" } else { &ep.path };
            writeln!(
                writer,
                "  {} {} -> {} ({})  line {}",
                ep.method,
                path,
                ep.return_type,
                ep.params.join(", "),
                ep.line
            )?;
        }
        for entity in &ctx.entities {
            writeln!(writer, "  entity {}  line {}", entity.name, entity.line)?;
        }
    }

    Ok(())
}

/// Write the URL table as aligned `key = value` lines.
pub fn write_urls_text<W: Write>(writer: &mut W, table: &UrlTable) -> Result<()> {
    if table.is_empty() {
        writeln!(writer, "No URL keys found.")?;
        return Ok(());
    }

    let width = table.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in table.iter() {
        writeln!(
            writer,
            "{:<width$} = {}  ({}, {})",
            entry.key,
            entry.value,
            entry.format,
            entry.source.display(),
            width = width
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{EndpointFact, EntityFact};
    use crate::service::DependencyEdge;
    use crate::urls::UrlTableEntry;
    use crate::walk::ConfigDialect;
    use std::path::PathBuf;

    #[test]
    fn scan_text_has_summary_and_contexts() {
        let mut result = ScanResult::default();
        let ctx = result.contexts.entry("orders");
        ctx.endpoints.push(EndpointFact {
            method: "ROUTE".to_string(),
            path: String::new(),
            return_type: "unknown".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
            line: 7,
        });
        ctx.entities.push(EntityFact {
            name: "Order".to_string(),
            line: 2,
        });
        result.dependencies.push(DependencyEdge {
            caller: "orders".to_string(),
            callee: "unknown".to_string(),
            label: "put".to_string(),
        });

        let mut buf = Vec::new();
        write_scan_text(&mut buf, Path::new("/repo"), &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Total detected dependencies: 1"));
        assert!(text.contains("Total detected entities: 1"));
        assert!(text.contains("orders -> unknown [put]"));
        assert!(text.contains("orders (1 endpoints, 1 entities)"));
        assert!(text.contains("ROUTE - -> unknown (a, b)  line 7"));
        assert!(text.contains("entity Order  line 2"));
    }

    #[test]
    fn urls_text_aligns_keys() {
        let mut table = UrlTable::new();
        for (key, value) in [("a.url", "http://a"), ("paymentUrl", "http://p")] {
            table.insert(UrlTableEntry {
                key: key.to_string(),
                value: value.to_string(),
                format: ConfigDialect::Properties,
                source: PathBuf::from("svc/conf/app.properties"),
            });
        }
        let mut buf = Vec::new();
        write_urls_text(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("a.url      = http://a  (properties, svc/conf/app.properties)"));
        assert!(text.contains("paymentUrl = http://p"));
    }

    #[test]
    fn urls_text_empty_table() {
        let mut buf = Vec::new();
        write_urls_text(&mut buf, &UrlTable::new()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No URL keys found.\n");
    }
}
