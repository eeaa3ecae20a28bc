//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use textlens_core::{
    api::{ApiServer, ApiServerConfig},
    AnalysisCache, AnalysisOrchestrator, AnalysisService, GrammarChecker, GrammarClient,
    GrammarIssue, GrammarRule, LocalAnalysis, Replacement, Result, SemanticMetrics,
    SentimentResult, StandardAnalyzers, TextLensError,
};
use tower::ServiceExt;

/// How the fake grammar provider behaves
#[derive(Clone)]
pub enum ProviderBehavior {
    /// Answer immediately with these issues
    Issues(Vec<GrammarIssue>),
    /// Answer with a provider error (e.g. a 5xx)
    Fail,
    /// Never answer within the client timeout
    Stall,
}

/// Grammar provider fake that counts its calls
pub struct FakeGrammarChecker {
    behavior: ProviderBehavior,
    calls: AtomicUsize,
}

impl FakeGrammarChecker {
    pub fn new(behavior: ProviderBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GrammarChecker for FakeGrammarChecker {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarIssue>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            ProviderBehavior::Issues(issues) => Ok(issues.clone()),
            ProviderBehavior::Fail => Err(TextLensError::GrammarProvider(
                "request failed with status 503 Service Unavailable".to_string(),
            )),
            ProviderBehavior::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(vec![])
            }
        }
    }
}

/// Standard analyzers that count every invocation
#[derive(Default)]
pub struct CountingAnalyzers {
    inner: StandardAnalyzers,
    calls: AtomicUsize,
}

impl CountingAnalyzers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocalAnalysis for CountingAnalyzers {
    fn score_sentiment(&self, text: &str) -> SentimentResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.score_sentiment(text)
    }

    fn detect_language(&self, text: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.detect_language(text)
    }

    fn compute_semantics(&self, text: &str) -> SemanticMetrics {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compute_semantics(text)
    }
}

/// Analyzers whose semantic metrics always panic
pub struct PanickingAnalyzers;

impl LocalAnalysis for PanickingAnalyzers {
    fn score_sentiment(&self, _text: &str) -> SentimentResult {
        SentimentResult::neutral()
    }

    fn detect_language(&self, _text: &str) -> String {
        "unknown".to_string()
    }

    fn compute_semantics(&self, _text: &str) -> SemanticMetrics {
        panic!("tokenizer state corrupted")
    }
}

/// A typical spelling issue as reported by the provider
pub fn spelling_issue() -> GrammarIssue {
    GrammarIssue {
        message: "Possible spelling mistake found.".to_string(),
        offset: 0,
        length: 4,
        rule: GrammarRule {
            id: "MORFOLOGIK_RULE_EN_US".to_string(),
            description: "Possible spelling mistake".to_string(),
            category: "TYPOS".to_string(),
        },
        replacements: vec![Replacement {
            value: "This".to_string(),
        }],
    }
}

/// Build a service around the given fakes
pub fn create_test_service(
    checker: Arc<dyn GrammarChecker>,
    analyzers: Arc<dyn LocalAnalysis>,
    ttl: Duration,
) -> Arc<AnalysisService> {
    let orchestrator = AnalysisOrchestrator::new(
        GrammarClient::new(checker, Duration::from_millis(100)),
        analyzers,
    );
    Arc::new(AnalysisService::new(orchestrator, AnalysisCache::new(ttl, 100)))
}

/// Build the full HTTP router around a service
pub fn create_test_router(service: Arc<AnalysisService>) -> Router {
    ApiServer::new(ApiServerConfig::default(), service).router()
}

/// POST a raw body and return status plus decoded JSON body
pub async fn post_raw(router: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// POST a JSON body
pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

/// POST and return the raw response bytes
pub async fn post_bytes(router: &Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// GET and return status plus decoded JSON body
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
