//! Alphabet-based tokenization
//!
//! Text is lowercased and split on every run of characters outside the
//! accepted alphabet (ASCII letters plus the active languages' diacritics).
//! Digits and punctuation therefore always act as separators.

use super::stopwords::StopwordSet;
use std::sync::Arc;

/// Default minimum token length in characters
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// A tokenizer producing filtered, lowercase content words
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: Arc<StopwordSet>,
    /// Minimum token length to keep (in characters)
    min_token_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Arc::new(StopwordSet::default()))
    }
}

impl Tokenizer {
    /// Create a tokenizer sharing the given stopword set
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            stopwords,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
        }
    }

    /// Set minimum token length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    /// The stopword set used for filtering
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Tokenize text into an ordered sequence of content words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.split_words(text)
            .into_iter()
            .filter(|word| word.chars().count() >= self.min_token_length)
            .filter(|word| !self.stopwords.contains(word))
            .collect()
    }

    /// Tokenize several texts into one document each
    pub fn tokenize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<String>> {
        texts.iter().map(|t| self.tokenize(t.as_ref())).collect()
    }

    /// Lowercase and split on runs of non-alphabet characters, without
    /// length or stopword filtering
    pub fn split_words(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !self.stopwords.is_letter(c))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stopwords::Language;

    fn english() -> Tokenizer {
        Tokenizer::new(Arc::new(StopwordSet::new(&[Language::English])))
    }

    #[test]
    fn test_basic_tokenization() {
        let tokens = english().tokenize("The Quick brown fox jumps over the lazy dog");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "jumps", "lazy", "dog"]);
    }

    #[test]
    fn test_splits_on_digits_and_punctuation() {
        let tokens = english().tokenize("rust-lang2024 tutorial!!!part3");
        assert_eq!(tokens, vec!["rust", "lang", "tutorial", "part"]);
    }

    #[test]
    fn test_short_words_dropped() {
        let tokens = english().tokenize("ai ml go rust");
        assert_eq!(tokens, vec!["rust"]);
    }

    #[test]
    fn test_german_diacritics_kept() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("Größte Brücke über den Fluß");
        assert_eq!(tokens, vec!["größte", "brücke", "fluß"]);
    }

    #[test]
    fn test_diacritics_split_without_language() {
        // Without German, 'ü' is a separator
        let tokens = english().tokenize("Brücke");
        assert_eq!(tokens, vec!["cke"]);
    }

    #[test]
    fn test_length_counts_characters() {
        // "öde" is three characters but four bytes
        let tokens = Tokenizer::default().tokenize("öde");
        assert_eq!(tokens, vec!["öde"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(english().tokenize("").is_empty());
        assert!(english().tokenize("   123 !!! ").is_empty());
    }

    #[test]
    fn test_split_words_unfiltered() {
        let words = english().split_words("The AI, and 4K");
        assert_eq!(words, vec!["the", "ai", "and", "k"]);
    }

    #[test]
    fn test_custom_min_length() {
        let tokens = english().with_min_length(5).tokenize("rust crate cargo");
        assert_eq!(tokens, vec!["crate", "cargo"]);
    }
}
