//! N-gram phrase extraction
//!
//! Phrases are windows of 2 to 4 whitespace-separated words taken from the
//! raw lowercased text, not from the filtered token stream, so punctuation
//! attached to a word stays part of it. A window is discarded when any of
//! its words is a stopword.

use crate::nlp::stopwords::StopwordSet;
use crate::types::Phrase;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Shortest phrase length in words
pub const MIN_PHRASE_WORDS: usize = 2;
/// Longest phrase length in words
pub const MAX_PHRASE_WORDS: usize = 4;

/// Phrase counts in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCounts {
    index: FxHashMap<String, usize>,
    phrases: Vec<Phrase>,
}

impl PhraseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    fn increment(&mut self, text: String) {
        if let Some(&idx) = self.index.get(&text) {
            self.phrases[idx].count += 1;
            return;
        }
        self.index.insert(text.clone(), self.phrases.len());
        self.phrases.push(Phrase::new(text, 1));
    }

    /// Occurrence count of a phrase (0 when never seen)
    pub fn get(&self, phrase: &str) -> usize {
        self.index
            .get(phrase)
            .map(|&idx| self.phrases[idx].count)
            .unwrap_or(0)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(phrase)
    }

    /// All phrases in order of first occurrence
    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }

    /// The `n` most frequent phrases, descending by count.
    ///
    /// Ties keep first-occurrence order.
    pub fn top(&self, n: usize) -> Vec<Phrase> {
        let mut ranked = self.phrases.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Counts stopword-free n-grams across a set of texts
#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    stopwords: Arc<StopwordSet>,
    min_words: usize,
    max_words: usize,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::new(Arc::new(StopwordSet::default()))
    }
}

impl PhraseExtractor {
    /// Create an extractor for 2- to 4-word phrases
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            stopwords,
            min_words: MIN_PHRASE_WORDS,
            max_words: MAX_PHRASE_WORDS,
        }
    }

    /// Count every accepted phrase across all texts
    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> PhraseCounts {
        let mut counts = PhraseCounts::new();

        for text in texts {
            let lower = text.as_ref().to_lowercase();
            let words: Vec<&str> = lower.split_whitespace().collect();

            for start in 0..words.len() {
                for len in self.min_words..=self.max_words {
                    let Some(window) = words.get(start..start + len) else {
                        break;
                    };
                    if window.iter().any(|w| self.stopwords.contains(w)) {
                        continue;
                    }
                    let phrase = window.join(" ");
                    if phrase.chars().count() <= 3 {
                        continue;
                    }
                    counts.increment(phrase);
                }
            }
        }

        counts
    }

    /// Extract and keep only the `top_n` most frequent phrases
    pub fn extract_top<S: AsRef<str>>(&self, texts: &[S], top_n: usize) -> Vec<Phrase> {
        self.extract(texts).top(top_n)
    }
}

/// Count phrases with the default English and German vocabulary
pub fn extract_phrases<S: AsRef<str>>(texts: &[S]) -> PhraseCounts {
    PhraseExtractor::default().extract(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PhraseExtractor {
        PhraseExtractor::default()
    }

    #[test]
    fn test_all_window_sizes() {
        let counts = extractor().extract(&["rust async runtime internals"]);

        assert!(counts.contains("rust async"));
        assert!(counts.contains("async runtime"));
        assert!(counts.contains("rust async runtime"));
        assert!(counts.contains("rust async runtime internals"));
        // 3 bigrams + 2 trigrams + 1 four-gram
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn test_stopword_windows_rejected() {
        let counts = extractor().extract(&["cats and dogs living together"]);

        assert!(counts.iter().all(|p| !p.text.split(' ').any(|w| w == "and")));
        assert!(counts.contains("dogs living together"));
        assert!(!counts.contains("cats and"));
    }

    #[test]
    fn test_short_phrases_rejected() {
        let counts = extractor().extract(&["x y"]);
        assert!(counts.is_empty());

        let counts = extractor().extract(&["xy zq"]);
        assert_eq!(counts.get("xy zq"), 1);
    }

    #[test]
    fn test_counts_across_texts() {
        let counts = extractor().extract(&[
            "Machine Learning basics",
            "advanced machine learning",
            "machine learning",
        ]);
        assert_eq!(counts.get("machine learning"), 3);
        assert_eq!(counts.get("machine learning basics"), 1);
        assert_eq!(counts.get("never seen"), 0);
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let counts = extractor().extract(&["breaking news: markets crash"]);
        assert!(counts.contains("breaking news:"));
        assert!(counts.contains("news: markets"));
    }

    #[test]
    fn test_top_is_stable() {
        let counts = extractor().extract(&["alpha beta", "gamma delta", "gamma delta"]);
        let top = counts.top(10);

        assert_eq!(top[0], Phrase::new("gamma delta", 2));
        assert_eq!(top[1], Phrase::new("alpha beta", 1));

        assert_eq!(counts.top(1).len(), 1);
    }

    #[test]
    fn test_extract_phrases_default_vocabulary() {
        let counts = extract_phrases(&["alpha beta gamma the delta"]);
        assert!(counts.contains("alpha beta gamma"));
        assert!(counts.iter().all(|p| !p.text.contains("the")));
    }

    #[test]
    fn test_empty_input() {
        let texts: Vec<String> = Vec::new();
        assert!(extractor().extract(&texts).is_empty());
        assert!(extractor().extract(&[""]).is_empty());
    }

    #[test]
    fn test_extract_top() {
        let top = extractor().extract_top(&["rust tips", "rust tips", "go tips"], 1);
        assert_eq!(top, vec![Phrase::new("rust tips", 2)]);
    }
}
