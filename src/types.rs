//! Core data types for the TextLens analysis service
//!
//! Defines the validated request, the per-analyzer results and the merged
//! `AnalysisResult` that is cached and returned to callers. Field names on the
//! wire are camelCase to match the UI contract.

use crate::error::{Result, TextLensError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum accepted text length, in Unicode code points
pub const MIN_TEXT_LENGTH: usize = 1;

/// Maximum accepted text length, in Unicode code points
pub const MAX_TEXT_LENGTH: usize = 5000;

/// A text that passed length validation
///
/// The only way to obtain one is through [`AnalysisRequest::new`] or
/// [`AnalysisRequest::from_json`], so every analyzer entry point that takes an
/// `AnalysisRequest` is guaranteed to see valid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Validate a raw text
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let length = text.chars().count();

        if length < MIN_TEXT_LENGTH {
            return Err(TextLensError::Validation(vec![ValidationIssue::too_small(
                MIN_TEXT_LENGTH,
            )]));
        }
        if length > MAX_TEXT_LENGTH {
            return Err(TextLensError::Validation(vec![ValidationIssue::too_big(
                MAX_TEXT_LENGTH,
            )]));
        }

        Ok(Self { text })
    }

    /// Validate a decoded JSON request body of the form `{ "text": string }`
    pub fn from_json(body: &Value) -> Result<Self> {
        let object = body.as_object().ok_or_else(|| {
            TextLensError::Validation(vec![ValidationIssue::invalid_type(
                Vec::new(),
                "object",
                json_type_name(body),
            )])
        })?;

        match object.get("text") {
            None => Err(TextLensError::Validation(vec![ValidationIssue::required(
                "text",
            )])),
            Some(Value::String(text)) => Self::new(text.clone()),
            Some(other) => Err(TextLensError::Validation(vec![
                ValidationIssue::invalid_type(
                    vec!["text".to_string()],
                    "string",
                    json_type_name(other),
                ),
            ])),
        }
    }

    /// The validated text
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One entry of the `details` array of a validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Machine-readable issue code (`too_small`, `too_big`, `invalid_type`, `invalid_json`)
    pub code: String,
    /// Path of the offending field within the request body
    pub path: Vec<String>,
    /// Human-readable message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<usize>,
}

impl ValidationIssue {
    pub fn too_small(minimum: usize) -> Self {
        Self {
            code: "too_small".to_string(),
            path: vec!["text".to_string()],
            message: format!("String must contain at least {} character(s)", minimum),
            minimum: Some(minimum),
            maximum: None,
        }
    }

    pub fn too_big(maximum: usize) -> Self {
        Self {
            code: "too_big".to_string(),
            path: vec!["text".to_string()],
            message: format!("String must contain at most {} character(s)", maximum),
            minimum: None,
            maximum: Some(maximum),
        }
    }

    pub fn required(field: &str) -> Self {
        Self {
            code: "invalid_type".to_string(),
            path: vec![field.to_string()],
            message: "Required".to_string(),
            minimum: None,
            maximum: None,
        }
    }

    pub fn invalid_type(path: Vec<String>, expected: &str, received: &str) -> Self {
        Self {
            code: "invalid_type".to_string(),
            path,
            message: format!("Expected {}, received {}", expected, received),
            minimum: None,
            maximum: None,
        }
    }

    /// Body was not decodable JSON (or had the wrong content type)
    pub fn invalid_json(reason: impl Into<String>) -> Self {
        Self {
            code: "invalid_json".to_string(),
            path: Vec::new(),
            message: reason.into(),
            minimum: None,
            maximum: None,
        }
    }
}

/// Rule that produced a grammar issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    pub id: String,
    pub description: String,
    pub category: String,
}

/// Suggested replacement for a grammar issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub value: String,
}

/// A single grammar or spelling issue reported by the provider
///
/// `offset` and `length` are trusted from the provider and not re-validated
/// against the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub message: String,
    pub offset: usize,
    pub length: usize,
    pub rule: GrammarRule,
    pub replacements: Vec<Replacement>,
}

/// Lexicon-based sentiment of a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Signed sum of token weights
    pub score: i32,
    /// `score / wordCount`, or 0 for a text without tokens
    pub comparative: f64,
    /// Distinct tokens with positive weight, first-seen order
    pub positive: Vec<String>,
    /// Distinct tokens with negative weight, first-seen order
    pub negative: Vec<String>,
}

impl SentimentResult {
    /// Result for a text that carries no sentiment at all
    pub fn neutral() -> Self {
        Self {
            score: 0,
            comparative: 0.0,
            positive: Vec::new(),
            negative: Vec::new(),
        }
    }
}

/// Readability tier derived from average words per sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    /// Upper bound (inclusive) of words per sentence for `Simple`
    pub const SIMPLE_MAX: f64 = 10.0;
    /// Upper bound (inclusive) of words per sentence for `Moderate`
    pub const MODERATE_MAX: f64 = 20.0;

    /// Classify an average number of words per sentence
    pub fn from_words_per_sentence(average: f64) -> Self {
        if average > Self::MODERATE_MAX {
            Complexity::Complex
        } else if average > Self::SIMPLE_MAX {
            Complexity::Moderate
        } else {
            Complexity::Simple
        }
    }
}

/// Coarse structural metrics of a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub complexity: Complexity,
}

/// Merged output of every analyzer for one text
///
/// Immutable once built; cached and shared as `Arc<AnalysisResult>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub grammar_errors: Vec<GrammarIssue>,
    pub sentiment: SentimentResult,
    /// ISO 639-3 code, or `"unknown"`
    pub language: String,
    pub semantic_analysis: SemanticMetrics,
}

/// Response body of the language-only endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub language: String,
}
