//! TextLens - Composite Text Analysis Service
//!
//! Accepts a block of free text and returns, in one response:
//! - Grammar and spelling issues from a remote LanguageTool-compatible provider
//! - A lexicon-based sentiment score with the contributing words
//! - The detected natural language
//! - Word/sentence counts and a complexity tier
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Types**: Request, per-analyzer results and the merged `AnalysisResult`
//! - **Analyzers**: Pure local computations (sentiment, language, semantics)
//! - **Services**: Best-effort client for the remote grammar provider
//! - **Orchestrator**: Concurrent fan-out to all analyzers and merge
//! - **Cache**: Process-wide TTL cache keyed by request text
//! - **API**: axum HTTP surface with error-to-status mapping
//!
//! # Example
//!
//! ```ignore
//! use textlens_core::{AnalysisRequest, AnalysisService, TextLensConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = TextLensConfig::from_env()?;
//!     let service = AnalysisService::from_config(&config)?;
//!
//!     let request = AnalysisRequest::new("I love sunny days. It is wonderful!")?;
//!     let result = service.analyze_text(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&*result)?);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzers;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod service;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use analyzers::{LocalAnalysis, StandardAnalyzers};
pub use cache::{AnalysisCache, ResultCache};
pub use config::TextLensConfig;
pub use error::{Result, TextLensError};
pub use orchestrator::AnalysisOrchestrator;
pub use service::AnalysisService;
pub use services::{GrammarChecker, GrammarClient, LanguageToolChecker};
pub use types::{
    AnalysisRequest, AnalysisResult, Complexity, GrammarIssue, GrammarRule, LanguageResponse,
    Replacement, SemanticMetrics, SentimentResult, ValidationIssue,
};
