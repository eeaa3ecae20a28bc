//! Local analyzers
//!
//! Pure, synchronous computations over a text: sentiment, language and
//! structural metrics. They perform no I/O and are safe to run on the blocking
//! pool concurrently with the remote grammar check.

pub mod language;
pub mod semantics;
pub mod sentiment;

pub use language::{LanguageDetector, UNKNOWN_LANGUAGE};
pub use semantics::compute_semantics;
pub use sentiment::SentimentScorer;

use crate::config::TextLensConfig;
use crate::types::{SemanticMetrics, SentimentResult};

/// The set of local analyzers the orchestrator fans out to
pub trait LocalAnalysis: Send + Sync {
    /// Lexicon-based sentiment
    fn score_sentiment(&self, text: &str) -> SentimentResult;

    /// ISO 639-3 code or `"unknown"`
    fn detect_language(&self, text: &str) -> String;

    /// Word/sentence counts and complexity tier
    fn compute_semantics(&self, text: &str) -> SemanticMetrics;
}

/// Production analyzers
#[derive(Debug, Clone, Default)]
pub struct StandardAnalyzers {
    sentiment: SentimentScorer,
    language: LanguageDetector,
}

impl StandardAnalyzers {
    pub fn new(sentiment: SentimentScorer, language: LanguageDetector) -> Self {
        Self {
            sentiment,
            language,
        }
    }

    /// Build from the `sentiment` and `language` configuration sections
    pub fn from_config(config: &TextLensConfig) -> Self {
        Self::new(
            SentimentScorer::with_extras(config.sentiment.extras.clone()),
            LanguageDetector::new(config.language.min_length),
        )
    }
}

impl LocalAnalysis for StandardAnalyzers {
    fn score_sentiment(&self, text: &str) -> SentimentResult {
        self.sentiment.score(text)
    }

    fn detect_language(&self, text: &str) -> String {
        self.language.detect(text)
    }

    fn compute_semantics(&self, text: &str) -> SemanticMetrics {
        compute_semantics(text)
    }
}
