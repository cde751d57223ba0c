//! Phrase extraction
//!
//! Counts stopword-free word n-grams across analyzed texts.

pub mod extraction;

pub use extraction::{extract_phrases, PhraseCounts, PhraseExtractor};
