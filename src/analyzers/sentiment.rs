//! Lexicon-based sentiment scoring
//!
//! Scores a text by summing AFINN-style integer weights (-5..=5) of its tokens.
//! A token directly preceded by a negator ("not", "don't", ...) contributes
//! the opposite weight.

use crate::types::SentimentResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Bundled lexicon, one `word<TAB>weight` entry per line
static LEXICON: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    include_str!("afinn.tsv")
        .lines()
        .filter_map(|line| {
            let (word, weight) = line.split_once('\t')?;
            Some((word.trim(), weight.trim().parse().ok()?))
        })
        .collect()
});

/// Everything except letters, digits, apostrophes, hyphens and whitespace
static STRIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}'\-\s]+").expect("valid strip pattern"));

const NEGATORS: &[&str] = &[
    "aint", "ain't", "arent", "aren't", "cannot", "cant", "can't", "couldnt", "couldn't",
    "darent", "daren't", "didnt", "didn't", "doesnt", "doesn't", "dont", "don't", "hadnt",
    "hadn't", "hasnt", "hasn't", "havent", "haven't", "isnt", "isn't", "mightnt", "mightn't",
    "mustnt", "mustn't", "neither", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "oughtn't", "shant", "shan't", "shouldnt", "shouldn't", "wasnt",
    "wasn't", "werent", "weren't", "without", "wont", "won't", "wouldnt", "wouldn't",
];

/// Sentiment scorer over the bundled lexicon plus optional overrides
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    extras: HashMap<String, i32>,
}

impl SentimentScorer {
    /// Scorer using only the bundled lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer whose `extras` take precedence over the bundled lexicon
    pub fn with_extras(extras: HashMap<String, i32>) -> Self {
        let extras = extras
            .into_iter()
            .map(|(word, weight)| (word.to_lowercase(), weight))
            .collect();
        Self { extras }
    }

    fn weight(&self, token: &str) -> Option<i32> {
        self.extras
            .get(token)
            .copied()
            .or_else(|| LEXICON.get(token).copied())
    }

    /// Score a text
    pub fn score(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let mut score = 0i32;
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        let mut seen = HashSet::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut weight) = self.weight(token) else {
                continue;
            };

            if i > 0 && is_negator(&tokens[i - 1]) {
                weight = -weight;
            }

            score += weight;

            if weight != 0 && seen.insert((token.as_str(), weight > 0)) {
                if weight > 0 {
                    positive.push(token.clone());
                } else {
                    negative.push(token.clone());
                }
            }
        }

        SentimentResult {
            score,
            comparative: f64::from(score) / tokens.len() as f64,
            positive,
            negative,
        }
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}

/// Lowercase, strip punctuation, split on whitespace
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    STRIP_PATTERN
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '\'' || c == '-').to_string())
        .filter(|token| !token.is_empty())
        .collect()
}
