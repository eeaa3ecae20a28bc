//! Grammar checking against a remote LanguageTool-compatible provider
//!
//! The provider is an external, rate-limited dependency. `GrammarChecker` is the
//! raw capability (errors included); `GrammarClient` is what the orchestrator
//! uses: one round trip, bounded by a timeout, and every failure degrades to an
//! empty issue list. No retries: a superseded keystroke makes them pointless.

use crate::config::GrammarConfig;
use crate::error::{Result, TextLensError};
use crate::types::{GrammarIssue, GrammarRule, Replacement};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Capability to check a text for grammar and spelling issues
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Issue exactly one check for `text`
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>>;
}

/// LanguageTool HTTP binding
pub struct LanguageToolChecker {
    endpoint: String,
    language: String,
    client: reqwest::Client,
}

/// Form body of a check request
#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// Provider response; only `matches` is used
#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<ProviderMatch>,
}

#[derive(Debug, Deserialize)]
struct ProviderMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: ProviderRule,
}

#[derive(Debug, Deserialize)]
struct ProviderRule {
    id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: ProviderCategory,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderCategory {
    #[serde(default)]
    id: String,
}

impl From<ProviderMatch> for GrammarIssue {
    fn from(m: ProviderMatch) -> Self {
        GrammarIssue {
            message: m.message,
            offset: m.offset,
            length: m.length,
            rule: GrammarRule {
                id: m.rule.id,
                description: m.rule.description,
                category: m.rule.category.id,
            },
            replacements: m.replacements,
        }
    }
}

impl LanguageToolChecker {
    /// Create a checker; the HTTP client carries the configured timeout as well
    pub fn new(config: &GrammarConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("textlens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            client,
        })
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn check(&self, text: &str) -> Result<Vec<GrammarIssue>> {
        debug!("Calling grammar provider at {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&CheckRequest {
                text,
                language: &self.language,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TextLensError::GrammarProvider(format!(
                "request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: CheckResponse = response.json().await.map_err(|e| {
            TextLensError::GrammarProvider(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.matches.into_iter().map(GrammarIssue::from).collect())
    }
}

/// Best-effort grammar checking with a bounded round trip
#[derive(Clone)]
pub struct GrammarClient {
    checker: Arc<dyn GrammarChecker>,
    timeout: Duration,
}

impl GrammarClient {
    pub fn new(checker: Arc<dyn GrammarChecker>, timeout: Duration) -> Self {
        Self { checker, timeout }
    }

    /// Production client bound to the configured LanguageTool endpoint
    pub fn from_config(config: &GrammarConfig) -> Result<Self> {
        let checker = LanguageToolChecker::new(config)?;
        Ok(Self::new(Arc::new(checker), config.timeout))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check `text`; any failure yields an empty list
    ///
    /// Callers cannot distinguish "provider unavailable" from "no issues".
    pub async fn check(&self, text: &str) -> Vec<GrammarIssue> {
        match self.try_check(text).await {
            Ok(issues) => {
                debug!("Grammar provider reported {} issues", issues.len());
                issues
            }
            Err(e) => {
                warn!("Grammar check skipped: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_check(&self, text: &str) -> Result<Vec<GrammarIssue>> {
        tokio::time::timeout(self.timeout, self.checker.check(text))
            .await
            .map_err(|_| TextLensError::GrammarTimeout(self.timeout))?
    }
}
