//! Natural language processing utilities
//!
//! Stopword sets with their alphabets, and the tokenizer built on them.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::{Language, StopwordSet};
pub use tokenizer::Tokenizer;
