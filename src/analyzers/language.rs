//! Language identification
//!
//! Wraps the `whatlang` trigram classifier. Short texts carry too little signal
//! to classify and are reported as undetermined, like texts the classifier
//! rejects outright (digits, punctuation).

/// Literal returned when no language could be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Default minimum number of code points before classification is attempted
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// Statistical language detector
#[derive(Debug, Clone, Copy)]
pub struct LanguageDetector {
    min_length: usize,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl LanguageDetector {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// ISO 639-3 code of the dominant language, or `"unknown"`
    pub fn detect(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_length {
            return UNKNOWN_LANGUAGE.to_string();
        }

        match whatlang::detect(trimmed) {
            Some(info) => info.lang().code().to_string(),
            None => UNKNOWN_LANGUAGE.to_string(),
        }
    }
}
