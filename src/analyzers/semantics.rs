//! Word, sentence and complexity metrics

use crate::types::{Complexity, SemanticMetrics};
use once_cell::sync::Lazy;
use regex::Regex;

/// One or more sentence terminators act as a single delimiter
static SENTENCE_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence delimiter"));

/// Number of non-empty segments between sentence terminators
///
/// A whitespace-only segment still counts, so `"Hello. "` is two sentences.
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_DELIMITER
        .split(text)
        .filter(|segment| !segment.is_empty())
        .count()
}

/// Number of non-empty whitespace-delimited segments
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Average words per sentence, dividing by at least one sentence
pub fn words_per_sentence(word_count: usize, sentence_count: usize) -> f64 {
    // A text made only of terminators ("?!") has zero sentences.
    let divisor = sentence_count.max(1);
    word_count as f64 / divisor as f64
}

/// Compute the metrics of a text
pub fn compute_semantics(text: &str) -> SemanticMetrics {
    let word_count = count_words(text);
    let sentence_count = count_sentences(text);

    SemanticMetrics {
        word_count,
        sentence_count,
        complexity: Complexity::from_words_per_sentence(words_per_sentence(
            word_count,
            sentence_count,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_counts() {
        let metrics = compute_semantics("I love sunny days. It is wonderful!");
        assert_eq!(metrics.word_count, 7);
        assert_eq!(metrics.sentence_count, 2);
        assert_eq!(metrics.complexity, Complexity::Simple);
    }

    #[test]
    fn test_terminator_runs_are_one_delimiter() {
        assert_eq!(count_sentences("Really?!? Yes... Fine."), 3);
    }

    #[test]
    fn test_no_terminator_is_one_sentence() {
        let metrics = compute_semantics("no punctuation here at all");
        assert_eq!(metrics.sentence_count, 1);
        assert_eq!(metrics.word_count, 5);
    }

    #[test]
    fn test_whitespace_segment_counts_as_sentence() {
        assert_eq!(count_sentences("Hello."), 1);
        assert_eq!(count_sentences("Hello. "), 2);
        assert_eq!(count_sentences("I love sunny days. It is wonderful! "), 3);
        assert_eq!(compute_semantics("   ").sentence_count, 1);
    }

    #[test]
    fn test_zero_sentences_guard() {
        let metrics = compute_semantics("?!");
        assert_eq!(metrics.sentence_count, 0);
        assert_eq!(metrics.word_count, 1);
        assert_eq!(metrics.complexity, Complexity::Simple);
        assert_eq!(words_per_sentence(25, 0), 25.0);
    }

    #[test]
    fn test_complexity_boundaries() {
        let ten = vec!["word"; 10].join(" ") + ".";
        assert_eq!(compute_semantics(&ten).complexity, Complexity::Simple);

        let eleven = vec!["word"; 11].join(" ") + ".";
        assert_eq!(compute_semantics(&eleven).complexity, Complexity::Moderate);

        let twenty = vec!["word"; 20].join(" ") + ".";
        assert_eq!(compute_semantics(&twenty).complexity, Complexity::Moderate);

        let twenty_one = vec!["word"; 21].join(" ") + ".";
        assert_eq!(compute_semantics(&twenty_one).complexity, Complexity::Complex);
    }

    proptest! {
        #[test]
        fn prop_word_count_matches_whitespace_segments(text in "[a-z .!?\t\n]{1,200}") {
            let expected = text.split(|c: char| c.is_whitespace()).filter(|s| !s.is_empty()).count();
            prop_assert_eq!(compute_semantics(&text).word_count, expected);
        }

        #[test]
        fn prop_text_without_terminators_has_one_sentence(text in "[a-z]{1,20}( [a-z]{1,20}){0,30}") {
            prop_assert_eq!(compute_semantics(&text).sentence_count, 1);
        }
    }
}
