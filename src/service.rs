//! Analysis service: the operations exposed to callers
//!
//! Every operation takes a validated [`AnalysisRequest`]. Full analyses go
//! through the process-wide result cache; the language-only and semantic-only
//! operations run a single local analyzer on the blocking pool and bypass both
//! the cache and the grammar provider.

use crate::analyzers::{LocalAnalysis, StandardAnalyzers};
use crate::cache::{AnalysisCache, CacheStats};
use crate::config::TextLensConfig;
use crate::error::Result;
use crate::orchestrator::AnalysisOrchestrator;
use crate::services::GrammarClient;
use crate::types::{AnalysisRequest, AnalysisResult, SemanticMetrics};
use std::sync::Arc;
use tracing::debug;

/// Entry point for all analysis operations
pub struct AnalysisService {
    orchestrator: AnalysisOrchestrator,
    cache: AnalysisCache,
}

impl AnalysisService {
    pub fn new(orchestrator: AnalysisOrchestrator, cache: AnalysisCache) -> Self {
        Self {
            orchestrator,
            cache,
        }
    }

    /// Production wiring: LanguageTool client, standard analyzers, configured cache
    pub fn from_config(config: &TextLensConfig) -> Result<Self> {
        let grammar = GrammarClient::from_config(&config.grammar)?;
        let analyzers: Arc<dyn LocalAnalysis> = Arc::new(StandardAnalyzers::from_config(config));
        let cache = AnalysisCache::new(config.cache.ttl, config.cache.capacity);

        Ok(Self::new(AnalysisOrchestrator::new(grammar, analyzers), cache))
    }

    /// Full analysis, served from cache when the same text was analyzed recently
    pub async fn analyze_text(&self, request: &AnalysisRequest) -> Result<Arc<AnalysisResult>> {
        let text = request.text();

        if let Some(result) = self.cache.get(text) {
            debug!("Cache hit");
            return Ok(result);
        }

        self.cache
            .get_or_try_insert_with(text, || self.orchestrator.analyze(text))
            .await
    }

    /// Language only
    pub async fn detect_language(&self, request: &AnalysisRequest) -> Result<String> {
        let text: Arc<str> = Arc::from(request.text());
        self.orchestrator
            .run_local("language", &text, |a, t| a.detect_language(t))
            .await
    }

    /// Structural metrics only
    pub async fn analyze_semantics(&self, request: &AnalysisRequest) -> Result<SemanticMetrics> {
        let text: Arc<str> = Arc::from(request.text());
        self.orchestrator
            .run_local("semantics", &text, |a, t| a.compute_semantics(t))
            .await
    }

    /// Drop expired cache entries
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of orchestration runs since start
    pub fn analyses_computed(&self) -> u64 {
        self.orchestrator.runs()
    }
}
