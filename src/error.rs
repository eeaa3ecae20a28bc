//! Error types for the TextLens analysis service
//!
//! This module provides structured error definitions using thiserror; the binary
//! edge uses anyhow for propagation.

use crate::types::ValidationIssue;
use std::time::Duration;
use thiserror::Error;

/// Main error type for TextLens operations
#[derive(Error, Debug)]
pub enum TextLensError {
    /// Request text failed validation
    #[error("Validation error: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Request body exceeded the accepted size
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Grammar provider answered with an error
    #[error("Grammar provider error: {0}")]
    GrammarProvider(String),

    /// Grammar provider did not answer in time
    #[error("Grammar provider timed out after {0:?}")]
    GrammarTimeout(Duration),

    /// A local analyzer panicked or was cancelled
    #[error("Analyzer fault: {0}")]
    AnalyzerFault(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for TextLens operations
pub type Result<T> = std::result::Result<T, TextLensError>;

/// Convert anyhow::Error to TextLensError
impl From<anyhow::Error> for TextLensError {
    fn from(err: anyhow::Error) -> Self {
        TextLensError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextLensError::AnalyzerFault("sentiment analyzer panicked".to_string());
        assert_eq!(err.to_string(), "Analyzer fault: sentiment analyzer panicked");
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = TextLensError::Validation(vec![ValidationIssue::too_small(1)]);
        assert_eq!(
            err.to_string(),
            "Validation error: String must contain at least 1 character(s)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json");
        assert!(parse_err.is_err());

        let err: TextLensError = parse_err.unwrap_err().into();
        assert!(matches!(err, TextLensError::Serialization(_)));
    }
}
