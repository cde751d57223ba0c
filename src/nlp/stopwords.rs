//! Stopword sets and language alphabets
//!
//! A [`StopwordSet`] is built once at startup from one or more languages and
//! shared read-only between every tokenizer and extractor. Besides function
//! words it carries platform noise (words every video page repeats) and the
//! per-language letters the tokenizer accepts.

use crate::errors::{FeedError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Languages with built-in stopword lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    German,
}

impl Language {
    /// Parse a language code or name
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "de" | "german" | "deutsch" => Ok(Language::German),
            other => Err(FeedError::invalid_config(format!(
                "unsupported language '{other}'"
            ))),
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }

    fn stopwords(&self) -> &'static [&'static str] {
        match self {
            Language::English => STOPWORDS_EN,
            Language::German => STOPWORDS_DE,
        }
    }

    /// Letters beyond ASCII a-z that belong to this language's alphabet
    fn extra_letters(&self) -> &'static [char] {
        match self {
            Language::English => &[],
            Language::German => &['ä', 'ö', 'ü', 'ß'],
        }
    }
}

impl std::str::FromStr for Language {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self> {
        Language::parse(value)
    }
}

const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "nor", "for", "yet", "so", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "mine", "yours", "hers", "ours", "theirs", "this", "that", "these", "those", "who", "whom",
    "which", "what", "whose", "is", "am", "are", "was", "were", "be", "been", "being", "have",
    "has", "had", "having", "do", "does", "did", "doing", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must", "in", "on", "at", "to", "from", "by", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above", "below", "up",
    "down", "out", "off", "over", "under", "again", "further", "here", "there", "where", "when",
    "why", "how", "all", "each", "every", "both", "few", "more", "most", "other", "some", "any",
    "no", "not", "only", "own", "same", "than", "too", "very", "just", "also", "now", "then",
    "once", "always", "never", "if", "because", "as", "until", "while", "although", "though",
    "yes", "maybe", "of", "get", "got", "won", "don", "doesn", "didn", "isn", "aren", "wasn",
    "can't", "won't", "don't", "ll", "ve", "re",
];

const STOPWORDS_DE: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines", "einem", "einen",
    "und", "oder", "aber", "doch", "denn", "sondern", "ich", "du", "er", "sie", "es", "wir", "ihr",
    "mich", "dich", "sich", "uns", "euch", "mein", "dein", "sein", "unser", "euer", "ist", "sind",
    "war", "waren", "bin", "bist", "wird", "werden", "wurde", "wurden", "hat", "haben", "hatte",
    "hatten", "kann", "können", "muss", "müssen", "soll", "sollen", "will", "wollen", "nicht",
    "kein", "keine", "auch", "noch", "schon", "nur", "mit", "von", "zu", "zum", "zur", "bei",
    "nach", "aus", "für", "über", "unter", "auf", "an", "in", "im", "am", "vom", "als", "wie",
    "wenn", "dass", "was", "wer", "wo", "hier", "dort", "jetzt", "dann", "so", "sehr", "mehr",
    "alle", "alles", "diese", "dieser", "dieses", "diesem", "diesen", "man", "ja", "nein", "mal",
];

/// Words every video page repeats regardless of topic
const PLATFORM_NOISE: &[&str] = &[
    "video", "videos", "official", "channel", "subscribe", "subscribed", "subscribers", "views",
    "view", "watch", "watching", "like", "likes", "comment", "comments", "share", "youtube",
    "http", "https", "www", "com", "new", "full", "ago", "hours", "minutes", "days", "weeks",
    "months", "years", "vor", "aufrufe", "abonnieren", "kanal",
];

/// An immutable set of lowercase stopwords plus the accepted alphabet
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: FxHashSet<String>,
    extra_letters: FxHashSet<char>,
    languages: Vec<Language>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::new(&[Language::English, Language::German])
    }
}

impl StopwordSet {
    /// Build the set for the given languages (platform noise always included)
    pub fn new(languages: &[Language]) -> Self {
        Self::with_additional(languages, &[] as &[&str])
    }

    /// Build the set and extend it with custom words
    pub fn with_additional<S: AsRef<str>>(languages: &[Language], additional: &[S]) -> Self {
        let mut words: FxHashSet<String> = FxHashSet::default();
        let mut extra_letters: FxHashSet<char> = FxHashSet::default();
        let mut langs: Vec<Language> = Vec::new();

        for language in languages {
            if langs.contains(language) {
                continue;
            }
            langs.push(*language);
            words.extend(language.stopwords().iter().map(|w| w.to_string()));
            extra_letters.extend(language.extra_letters().iter().copied());
        }
        words.extend(PLATFORM_NOISE.iter().map(|w| w.to_string()));
        words.extend(
            additional
                .iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );

        Self {
            words,
            extra_letters,
            languages: langs,
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    /// Check if a lowercase character belongs to the accepted alphabet
    pub fn is_letter(&self, c: char) -> bool {
        c.is_ascii_lowercase() || self.extra_letters.contains(&c)
    }

    /// Languages this set was built from
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Number of distinct stopwords
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
