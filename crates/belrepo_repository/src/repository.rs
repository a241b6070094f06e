//! The repository cache manager.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use belrepo_cache::{
    AggregateCache, CacheSettings, DocumentCache, DocumentRef, Format, FormatRegistry,
    WriteOptions,
};
use belrepo_compiler::{BelCompiler, CompileOptions, CompileOverrides, Compiler, Enricher};
use belrepo_config::{ConfigError, RepositoryConfig};
use belrepo_graph::{serialize_authors, union, BelGraph, MetadataOverlay, SummaryRecord};

use crate::discover::{Discoverer, Documents};
use crate::error::RepositoryError;
use crate::outcome::{DocumentOutcome, GraphsReport, SkipReason};
use crate::progress::{NoProgress, Progress};

/// Parameters of one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphRequest {
    /// Serve documents and the aggregate from cache when possible.
    pub use_cached: bool,
    /// Compile options for this call only.
    pub overrides: CompileOverrides,
}

impl Default for GraphRequest {
    fn default() -> Self {
        Self {
            use_cached: true,
            overrides: CompileOverrides::default(),
        }
    }
}

impl GraphRequest {
    /// A request that recompiles every document.
    pub fn reload() -> Self {
        Self {
            use_cached: false,
            ..Self::default()
        }
    }
}

/// The aggregate graph plus, when it was rebuilt, the per-document report.
#[derive(Debug)]
pub struct AggregateReport {
    /// The aggregate graph with repository metadata applied.
    pub graph: BelGraph,
    /// `None` when the aggregate came straight from its cache.
    pub documents: Option<GraphsReport>,
}

/// Cache state of one document, as shown by a listing.
#[derive(Clone, Debug)]
pub struct DocumentStatus {
    /// The document.
    pub document: DocumentRef,
    /// Path relative to the repository root.
    pub relative_path: PathBuf,
    /// Formats with a cache file.
    pub formats: BTreeSet<Format>,
    /// A warnings table exists.
    pub has_warnings: bool,
    /// Cached statistics, if any cache exists.
    pub summary: Option<SummaryRecord>,
}

/// A directory of BEL documents with its per-document and aggregate caches.
pub struct Repository {
    root: PathBuf,
    output_directory: PathBuf,
    settings: CacheSettings,
    overlay: MetadataOverlay,
    options: CompileOptions,
    compiler: Box<dyn Compiler>,
    enricher: Option<Box<dyn Enricher>>,
    documents: DocumentCache,
    aggregate: AggregateCache,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("output_directory", &self.output_directory)
            .field("options", &self.options)
            .field("enricher", &self.enricher.is_some())
            .finish()
    }
}

impl Repository {
    /// Opens the repository at `root`, reading `bel-repository.toml` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let root = root.into();
        let config = belrepo_config::load_config(&root)?;
        Self::from_config(root, &config)
    }

    /// Builds a repository from an already loaded configuration, using
    /// [`BelCompiler`].
    pub fn from_config(root: impl Into<PathBuf>, config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        RepositoryBuilder::from_config(root, config).map(RepositoryBuilder::build)
    }

    /// Starts a builder with default settings.
    pub fn builder(root: impl Into<PathBuf>) -> RepositoryBuilder {
        RepositoryBuilder::new(root)
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where aggregate artifacts are written.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// The cache layout in effect.
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// The per-document cache.
    pub fn document_cache(&self) -> &DocumentCache {
        &self.documents
    }

    /// The aggregate cache.
    pub fn aggregate_cache(&self) -> &AggregateCache {
        &self.aggregate
    }

    /// A discoverer over the root.
    pub fn discoverer(&self) -> Discoverer {
        Discoverer::new(&self.root)
    }

    /// A fresh walk over the documents.
    pub fn documents(&self) -> Documents {
        self.discoverer().documents()
    }

    /// Produces a graph for every document.
    pub fn get_graphs(&self, request: &GraphRequest) -> Result<GraphsReport, RepositoryError> {
        self.get_graphs_with_progress(request, &mut NoProgress)
    }

    /// Like [`Self::get_graphs`], reporting to `progress`.
    ///
    /// Each document is served from its cache (if `use_cached`) or compiled
    /// and written back. Documents that fail to compile are skipped and
    /// listed in the report. The summary table is rewritten at the end.
    pub fn get_graphs_with_progress(
        &self,
        request: &GraphRequest,
        progress: &mut dyn Progress,
    ) -> Result<GraphsReport, RepositoryError> {
        let options = self.options.merged(&request.overrides);
        let mut report = GraphsReport::default();

        for (index, doc) in self.documents().enumerate() {
            progress.on_document(index, &doc);
            let path = doc.path();

            let cached = if request.use_cached {
                self.documents.read(&doc)?
            } else {
                None
            };

            let outcome = match cached {
                Some(graph) => {
                    report.insert(path.clone(), graph);
                    DocumentOutcome::Cached
                }
                None => match self.compile(&doc, &options) {
                    Ok(graph) => {
                        self.documents.write(&doc, &graph)?;
                        report.insert(path.clone(), graph);
                        DocumentOutcome::Compiled
                    }
                    Err(reason) => {
                        tracing::warn!(path = %path.display(), %reason, "skipping document");
                        DocumentOutcome::Skipped(reason)
                    }
                },
            };

            if let Some(graph) = report.get(&path) {
                if !graph.warnings.is_empty() {
                    tracing::debug!(
                        path = %path.display(),
                        count = graph.number_of_warnings(),
                        "document has warnings"
                    );
                }
            }

            progress.on_outcome(&doc, &outcome);
            report.outcomes.push((doc, outcome));
        }

        self.aggregate
            .write_summary_table(&report.summary_rows(&self.root))?;
        progress.on_finish(&report);
        Ok(report)
    }

    fn compile(&self, doc: &DocumentRef, options: &CompileOptions) -> Result<BelGraph, SkipReason> {
        let mut graph = self
            .compiler
            .compile(&doc.path(), options)
            .map_err(|e| SkipReason::from_compile(&e))?;
        if let Some(enricher) = &self.enricher {
            enricher
                .enrich(&mut graph)
                .map_err(|e| SkipReason::from_enrichment(&e))?;
        }
        graph.provenance = Some(doc.relative_to(&self.root));
        Ok(graph)
    }

    /// Produces the aggregate graph.
    pub fn get_graph(&self, request: &GraphRequest) -> Result<BelGraph, RepositoryError> {
        self.get_graph_with_progress(request, &mut NoProgress)
            .map(|r| r.graph)
    }

    /// Produces the aggregate graph, reporting to `progress`.
    ///
    /// With `use_cached`, a cached aggregate is returned without looking at
    /// any document. Otherwise the per-document graphs are obtained, merged,
    /// overlaid with repository metadata and written to the aggregate cache.
    pub fn get_graph_with_progress(
        &self,
        request: &GraphRequest,
        progress: &mut dyn Progress,
    ) -> Result<AggregateReport, RepositoryError> {
        if request.use_cached {
            if let Some(graph) = self.aggregate.read()? {
                tracing::debug!("aggregate cache hit");
                return Ok(AggregateReport {
                    graph,
                    documents: None,
                });
            }
        }

        let report = self.get_graphs_with_progress(request, progress)?;
        let mut graph = union(report.values());
        if !self.overlay.is_empty() {
            graph.document = self.overlay.apply(&graph.document);
        }
        tracing::info!(
            documents = report.graphs.len(),
            skipped = report.skipped().len(),
            "rebuilt aggregate graph"
        );
        self.aggregate.write(&graph)?;
        Ok(AggregateReport {
            graph,
            documents: Some(report),
        })
    }

    /// Produces one summary row per document, writing the summary table.
    pub fn get_summary(&self, request: &GraphRequest) -> Result<Vec<(PathBuf, SummaryRecord)>, RepositoryError> {
        let report = self.get_graphs(request)?;
        Ok(report.summary_rows(&self.root))
    }

    /// Deletes the aggregate cache files. Returns the number of files removed.
    pub fn clear_aggregate(&self) -> Result<usize, RepositoryError> {
        Ok(self.aggregate.invalidate()?)
    }

    /// Deletes every per-document cache file. Sources are left alone.
    pub fn clear_documents(&self) -> Result<usize, RepositoryError> {
        let mut removed = 0;
        for doc in self.documents() {
            removed += self.documents.invalidate(&doc)?;
        }
        tracing::info!(removed, "cleared document caches");
        Ok(removed)
    }

    /// Deletes both the aggregate and the per-document caches.
    pub fn clear_all(&self) -> Result<usize, RepositoryError> {
        Ok(self.clear_aggregate()? + self.clear_documents()?)
    }

    /// Cache state of every document, in discovery order.
    ///
    /// A cache whose statistics cannot be read is listed without a summary
    /// and logged, so one bad file does not hide the rest.
    pub fn document_status(&self) -> Vec<DocumentStatus> {
        self.documents()
            .map(|doc| {
                let summary = self.documents.read_summary(&doc).unwrap_or_else(|e| {
                    tracing::warn!(path = %doc.path().display(), error = %e, "unreadable document cache");
                    None
                });
                DocumentStatus {
                    relative_path: doc.relative_to(&self.root),
                    formats: self.documents.available_formats(&doc),
                    has_warnings: self.documents.has_warnings(&doc),
                    summary,
                    document: doc,
                }
            })
            .collect()
    }

    /// Formats with an aggregate cache file.
    pub fn aggregate_formats(&self) -> BTreeSet<Format> {
        self.aggregate.available_formats()
    }
}

/// Step-by-step construction of a [`Repository`].
pub struct RepositoryBuilder {
    root: PathBuf,
    output_directory: Option<PathBuf>,
    settings: CacheSettings,
    overlay: MetadataOverlay,
    options: CompileOptions,
    compiler: Box<dyn Compiler>,
    enricher: Option<Box<dyn Enricher>>,
}

impl RepositoryBuilder {
    /// Starts with default settings and [`BelCompiler`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_directory: None,
            settings: CacheSettings::default(),
            overlay: MetadataOverlay::default(),
            options: CompileOptions::default(),
            compiler: Box::new(BelCompiler::new()),
            enricher: None,
        }
    }

    /// Starts from a loaded configuration.
    ///
    /// Unknown or unusable format identifiers are configuration errors.
    pub fn from_config(root: impl Into<PathBuf>, config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        let root = root.into();
        let repo = &config.repository;
        let formats = FormatRegistry::from_ids(&repo.formats)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let settings = CacheSettings {
            cache_name: repo.cache_name.clone(),
            formats,
            write_options: WriteOptions {
                pretty: config.output.pretty,
                compression: config.output.compression,
            },
            clear_stale_warnings: repo.clear_stale_warnings,
        };
        let options = CompileOptions {
            allow_naked_names: config.compile.allow_naked_names,
            allow_undefined_namespaces: config.compile.allow_undefined_namespaces,
            strict: config.compile.strict,
        };
        let meta = &config.metadata;
        let overlay = MetadataOverlay {
            name: meta.name.clone(),
            version: meta.version.clone(),
            description: meta.description.clone(),
            authors: (!meta.authors.is_empty()).then(|| serialize_authors(&meta.authors)),
            contact: meta.contact.clone(),
            license: meta.license.clone(),
            copyright: meta.copyright.clone(),
            disclaimer: meta.disclaimer.clone(),
        };

        let mut builder = Self::new(root)
            .settings(settings)
            .overlay(overlay)
            .compile_options(options);
        builder.output_directory = repo.output_directory.clone();
        Ok(builder)
    }

    /// Sets the directory for aggregate artifacts; relative paths are
    /// resolved against the root.
    pub fn output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Sets the cache settings.
    pub fn settings(mut self, settings: CacheSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the repository metadata overlay.
    pub fn overlay(mut self, overlay: MetadataOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the base compile options.
    pub fn compile_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the compiler.
    pub fn compiler(mut self, compiler: impl Compiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// Installs an enricher run after every successful compile.
    pub fn enricher(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enricher = Some(Box::new(enricher));
        self
    }

    /// Finishes construction.
    pub fn build(self) -> Repository {
        let output_directory = match self.output_directory {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };
        Repository {
            documents: DocumentCache::new(&self.settings),
            aggregate: AggregateCache::new(&self.settings, &output_directory),
            root: self.root,
            output_directory,
            settings: self.settings,
            overlay: self.overlay,
            options: self.options,
            compiler: self.compiler,
            enricher: self.enricher,
        }
    }
}
