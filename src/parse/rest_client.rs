use crate::errors::{Result, SvcmapError};
use crate::service::UNKNOWN_SERVICE;
use crate::urls::UrlTable;
use regex::Regex;
use serde::Serialize;

/// Member-call verbs treated as outbound HTTP invocations.
pub const DEFAULT_CALL_VERBS: &[&str] = &["post", "get", "put", "delete"];

/// A lexically detected outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSiteFact {
    /// Verb as written in source (`get`, `POST`, ...)
    pub verb: String,
    /// Full matched text, from the `.` through the last `)` on the line
    pub matched: String,
    /// URL-table key whose value occurs in the file, or `unknown`
    pub callee: String,
    /// Line of the match (1-indexed)
    pub line: usize,
}

/// Detects `.verb(...)` member calls in raw source text.
///
/// Arguments are matched as an opaque span. The callee is resolved
/// file-wide: the first URL-table entry whose value occurs anywhere in the
/// text wins for every call in that file.
#[derive(Debug, Clone)]
pub struct CallSiteDetector {
    pattern: Regex,
}

impl CallSiteDetector {
    pub fn new() -> Self {
        let verbs: Vec<String> = DEFAULT_CALL_VERBS.iter().map(|s| s.to_string()).collect();
        Self::with_verbs(&verbs).expect("default call pattern compiles")
    }

    pub fn with_verbs(verbs: &[String]) -> Result<Self> {
        if verbs.is_empty() {
            return Err(SvcmapError::Config(
                "calls.verbs must name at least one verb".to_string(),
            ));
        }
        let alternation = verbs
            .iter()
            .map(|v| regex::escape(v))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\.({alternation})\s*\(.*\)"))
            .map_err(|e| SvcmapError::Config(format!("invalid call pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Find every call site in `source` and resolve its callee.
    pub fn detect(&self, source: &str, urls: &UrlTable) -> Vec<CallSiteFact> {
        let mut calls = Vec::new();
        let mut resolved: Option<String> = None;

        for caps in self.pattern.captures_iter(source) {
            let (Some(whole), Some(verb)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let callee = resolved
                .get_or_insert_with(|| {
                    urls.resolve(source)
                        .unwrap_or(UNKNOWN_SERVICE)
                        .to_string()
                })
                .clone();
            calls.push(CallSiteFact {
                verb: verb.as_str().to_string(),
                matched: whole.as_str().to_string(),
                callee,
                line: line_of(source, whole.start()),
            });
        }

        calls
    }
}

impl Default for CallSiteDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urls::UrlTableEntry;
    use crate::walk::ConfigDialect;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn table(entries: &[(&str, &str)]) -> UrlTable {
        let mut t = UrlTable::new();
        for (k, v) in entries {
            t.insert(UrlTableEntry {
                key: k.to_string(),
                value: v.to_string(),
                format: ConfigDialect::Properties,
                source: PathBuf::from("application.properties"),
            });
        }
        t
    }

    const TWO_CALLS: &str = r#"
public class OrderClient {
    private String base = "http://order-service:8080";
    public Order fetch() {
        return restTemplate.getForObject(base, Order.class);
    }
    public void place(Order o) {
        ResponseEntity<Void> r = client.post(base + "/orders", o);
        client.Delete (base);
    }
}
"#;

    #[test]
    fn detects_each_match() {
        let calls = CallSiteDetector::new().detect(TWO_CALLS, &UrlTable::new());
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].verb, "post");
        assert_eq!(calls[0].line, 8);
        assert_eq!(calls[1].verb, "Delete");
        assert_eq!(calls[1].matched, ".Delete (base)");
    }

    #[test]
    fn resolves_callee_by_file_wide_substring() {
        let urls = table(&[("orderUrl", "http://order-service")]);
        let calls = CallSiteDetector::new().detect(TWO_CALLS, &urls);
        assert!(calls.iter().all(|c| c.callee == "orderUrl"));
    }

    #[test]
    fn unmatched_table_resolves_unknown() {
        let urls = table(&[("userUrl", "http://user-service")]);
        let calls = CallSiteDetector::new().detect(TWO_CALLS, &urls);
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.callee == "unknown"));
    }

    #[test]
    fn first_matching_entry_in_table_order_wins() {
        let source = r#"a.get("http://user-service/u"); b.get("http://order-service/o");"#;
        let urls = table(&[
            ("orderUrl", "http://order-service"),
            ("userUrl", "http://user-service"),
        ]);
        let calls = CallSiteDetector::new().detect(source, &urls);
        // Greedy span: both calls share one line, so one match
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].callee, "orderUrl");
    }

    #[test]
    fn greedy_match_stops_at_end_of_line() {
        let source = "x.get(a)\ny.put(b)\n";
        let calls = CallSiteDetector::new().detect(source, &UrlTable::new());
        let verbs: Vec<&str> = calls.iter().map(|c| c.verb.as_str()).collect();
        assert_eq!(verbs, vec!["get", "put"]);
        assert_eq!(calls[0].matched, ".get(a)");
    }

    #[test]
    fn bare_function_calls_do_not_match() {
        let source = "get(x); post (y); object.fetch(z);";
        assert!(CallSiteDetector::new()
            .detect(source, &UrlTable::new())
            .is_empty());
    }

    #[test]
    fn custom_verbs_are_escaped() {
        let detector = CallSiteDetector::with_verbs(&["patch".to_string()]).unwrap();
        let calls = detector.detect("client.patch(url)\nclient.get(url)", &UrlTable::new());
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].verb, "patch");
        assert!(CallSiteDetector::with_verbs(&[]).is_err());
    }

    proptest! {
        #[test]
        fn detection_is_idempotent(
            lines in prop::collection::vec("[a-z]{1,5}\\.(get|post|put|delete|fetch)\\([a-z\"/:]{0,12}\\)", 0..10)
        ) {
            let source = lines.join("\n");
            let urls = table(&[("svcUrl", "http://svc")]);
            let detector = CallSiteDetector::new();
            let first = detector.detect(&source, &urls);
            let second = detector.detect(&source, &urls);
            let expected = lines.iter().filter(|l| !l.contains(".fetch(")).count();
            prop_assert_eq!(first.len(), expected);
            prop_assert_eq!(first, second);
        }
    }
}
