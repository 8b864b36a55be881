use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::parse::factory::create_extractor;
use crate::parse::rest_client::CallSiteDetector;
use crate::parse::DeclarationExtractor;
use crate::service::{service_name, ContextMap, DependencyEdge};
use crate::urls::{build_url_table, UrlTable};
use crate::walk::{excluded_ancestor, Language, SourceTree};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Counters accumulated over one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_visited: usize,
    pub java_files: usize,
    pub python_files: usize,
    pub files_skipped_syntax: usize,
    pub files_skipped_io: usize,
    pub config_files: usize,
    pub config_files_failed: usize,
    pub subtrees_pruned: usize,
}

/// Everything one scan produces.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub url_table: UrlTable,
    pub dependencies: Vec<DependencyEdge>,
    pub contexts: ContextMap,
    pub stats: ScanStats,
}

/// Single-pass traversal and aggregation engine.
pub struct Scanner {
    java: Box<dyn DeclarationExtractor>,
    python: Box<dyn DeclarationExtractor>,
    detector: CallSiteDetector,
    excluded_dirs: Vec<String>,
    exclude: GlobSet,
    progress: bool,
}

impl Scanner {
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in config.exclude_globs() {
            builder.add(Glob::new(&pattern)?);
        }

        Ok(Self {
            java: create_extractor(Language::Java, config),
            python: create_extractor(Language::Python, config),
            detector: CallSiteDetector::with_verbs(&config.calls.verbs)?,
            excluded_dirs: config.excluded_dirs.clone(),
            exclude: builder.build()?,
            progress: false,
        })
    }

    /// Show a progress bar over the source-file pass.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn extractor(&self, lang: Language) -> &dyn DeclarationExtractor {
        match lang {
            Language::Java => self.java.as_ref(),
            Language::Python => self.python.as_ref(),
        }
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.is_match(relative)
            || relative
                .file_name()
                .is_some_and(|name| self.exclude.is_match(Path::new(name)))
    }

    /// Run the whole pipeline over `tree`.
    ///
    /// The URL table is built first from every config file under the root.
    /// Source files are then visited once, in the tree's order; failures on
    /// individual files are logged and counted, never propagated.
    pub fn run(&self, tree: &dyn SourceTree) -> ScanResult {
        let config_scan = build_url_table(tree);
        let mut result = ScanResult {
            url_table: config_scan.table,
            stats: ScanStats {
                config_files: config_scan.files_read,
                config_files_failed: config_scan.files_failed,
                ..Default::default()
            },
            ..Default::default()
        };

        let files = tree.files();
        let progress = if self.progress {
            let pb = indicatif::ProgressBar::new(files.len() as u64);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut pruned: HashSet<PathBuf> = HashSet::new();

        for relative in &files {
            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if let Some(dir) = excluded_ancestor(relative, &self.excluded_dirs) {
                if pruned.insert(dir.clone()) {
                    tracing::debug!("Skipping excluded subtree: {}", dir.display());
                }
                continue;
            }
            if self.is_excluded(relative) {
                continue;
            }

            result.stats.files_visited += 1;
            let Some(lang) = Language::from_path(relative) else {
                continue;
            };
            self.visit(tree, relative, lang, &mut result);
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        result.stats.subtrees_pruned = pruned.len();
        tracing::info!(
            "Scanned {} files: {} dependencies, {} endpoints, {} entities across {} services",
            result.stats.files_visited,
            result.dependencies.len(),
            result.contexts.total_endpoints(),
            result.contexts.total_entities(),
            result.contexts.len()
        );

        result
    }

    fn visit(&self, tree: &dyn SourceTree, relative: &Path, lang: Language, result: &mut ScanResult) {
        let path = tree.root().join(relative);
        tracing::debug!("Processing file: {}", path.display());

        match lang {
            Language::Java => result.stats.java_files += 1,
            Language::Python => result.stats.python_files += 1,
        }

        let service = service_name(&path);
        result.contexts.entry(&service);

        let source = match tree.read_to_string(relative) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", path.display(), e);
                result.stats.files_skipped_io += 1;
                return;
            }
        };

        let extractor = self.extractor(lang);
        let extraction = extractor.extract(source.as_bytes(), &path);
        if extraction.failure.is_some() {
            result.stats.files_skipped_syntax += 1;
        }

        if extractor.detects_call_sites() {
            for call in self.detector.detect(&source, &result.url_table) {
                result.dependencies.push(DependencyEdge {
                    caller: service.clone(),
                    callee: call.callee,
                    label: call.verb,
                });
            }
        }

        let context = result.contexts.entry(&service);
        context.endpoints.extend(extraction.facts.endpoints);
        context.entities.extend(extraction.facts.entities);
    }
}
