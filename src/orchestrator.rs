//! Fan-out/fan-in of a single text across every analyzer
//!
//! The grammar call runs on the async runtime while each local analyzer runs on
//! the blocking pool; all four are joined before the merged result is built.
//! A local analyzer fault fails the whole analysis. Grammar failures never do:
//! `GrammarClient` has already turned them into an empty issue list.

use crate::analyzers::LocalAnalysis;
use crate::error::{Result, TextLensError};
use crate::services::GrammarClient;
use crate::types::AnalysisResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Composition point of the grammar client and the local analyzers
pub struct AnalysisOrchestrator {
    grammar: GrammarClient,
    analyzers: Arc<dyn LocalAnalysis>,
    runs: AtomicU64,
}

impl AnalysisOrchestrator {
    pub fn new(grammar: GrammarClient, analyzers: Arc<dyn LocalAnalysis>) -> Self {
        Self {
            grammar,
            analyzers,
            runs: AtomicU64::new(0),
        }
    }

    /// Local analyzers, shared with the narrower service operations
    pub fn analyzers(&self) -> &Arc<dyn LocalAnalysis> {
        &self.analyzers
    }

    /// Number of completed analyses
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Run every analyzer over `text` and merge their outputs
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let shared: Arc<str> = Arc::from(text);

        let grammar = async { Ok::<_, TextLensError>(self.grammar.check(text).await) };
        let sentiment = self.run_local("sentiment", &shared, |a, t| a.score_sentiment(t));
        let language = self.run_local("language", &shared, |a, t| a.detect_language(t));
        let semantics = self.run_local("semantics", &shared, |a, t| a.compute_semantics(t));

        let (grammar_errors, sentiment, language, semantic_analysis) =
            tokio::try_join!(grammar, sentiment, language, semantics)?;

        self.runs.fetch_add(1, Ordering::Relaxed);
        debug!(
            grammar_issues = grammar_errors.len(),
            language = %language,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            grammar_errors,
            sentiment,
            language,
            semantic_analysis,
        })
    }

    /// Run one local analyzer on the blocking pool; a panic becomes `AnalyzerFault`
    pub(crate) async fn run_local<T, F>(
        &self,
        name: &'static str,
        text: &Arc<str>,
        analyze: F,
    ) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn LocalAnalysis, &str) -> T + Send + 'static,
    {
        let analyzers = Arc::clone(&self.analyzers);
        let text = Arc::clone(text);

        tokio::task::spawn_blocking(move || analyze(analyzers.as_ref(), &*text))
            .await
            .map_err(|e| TextLensError::AnalyzerFault(format!("{} analyzer failed: {}", name, e)))
    }
}
