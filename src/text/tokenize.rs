//! Lexical tokenization for the BM25 index.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// ASCII-letter runs standing alone between word boundaries. Letters glued to
/// digits, underscores or non-ASCII letters do not match.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());

/// English function words dropped before indexing.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "is", "are", "to", "in", "that", "it", "of", "for", "on",
    "with", "as", "by", "this", "these", "those", "was", "were", "be", "been", "has", "have",
    "had", "but", "not", "from", "at", "which",
];

/// Lowercasing tokenizer with a stopword filter.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Tokenizer {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Split `text` into lowercase tokens, dropping stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_stopwords() {
        let tok = Tokenizer::default();
        assert_eq!(
            tok.tokenize("The Method of the Year"),
            vec!["method", "year"]
        );
    }

    #[test]
    fn test_drops_numbers_and_punctuation() {
        let tok = Tokenizer::default();
        assert_eq!(
            tok.tokenize("Section 4.2: BM25 scoring, v2 (draft)!"),
            vec!["section", "scoring", "draft"]
        );
    }

    #[test]
    fn test_mixed_script_words_are_dropped() {
        let tok = Tokenizer::default();
        // "café" and "snake_case" are not pure ASCII-letter words.
        assert_eq!(tok.tokenize("café menu snake_case"), vec!["menu"]);
    }

    #[test]
    fn test_empty_and_stopword_only_input() {
        let tok = Tokenizer::default();
        assert!(tok.tokenize("").is_empty());
        assert!(tok.tokenize("the and of").is_empty());
    }

    #[test]
    fn test_custom_stopwords_override_defaults() {
        let tok = Tokenizer::new(["persona", "TASK"]);
        assert_eq!(
            tok.tokenize("Persona: the analyst. Task: review"),
            vec!["the", "analyst", "review"]
        );
        assert!(tok.is_stopword("task"));
    }
}
