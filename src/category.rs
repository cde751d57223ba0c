//! Topic category detection
//!
//! Classifies free text into a fixed taxonomy by substring triggers. Matching
//! is plain containment on the lowercased text, so a trigger also fires
//! inside longer words ("game" matches "endgame").

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The fixed topic taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLabel {
    Gaming,
    Music,
    Tech,
    News,
    Education,
    Entertainment,
    Sports,
    Lifestyle,
}

impl CategoryLabel {
    /// All labels in taxonomy order
    pub const ALL: [CategoryLabel; 8] = [
        CategoryLabel::Gaming,
        CategoryLabel::Music,
        CategoryLabel::Tech,
        CategoryLabel::News,
        CategoryLabel::Education,
        CategoryLabel::Entertainment,
        CategoryLabel::Sports,
        CategoryLabel::Lifestyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Gaming => "gaming",
            CategoryLabel::Music => "music",
            CategoryLabel::Tech => "tech",
            CategoryLabel::News => "news",
            CategoryLabel::Education => "education",
            CategoryLabel::Entertainment => "entertainment",
            CategoryLabel::Sports => "sports",
            CategoryLabel::Lifestyle => "lifestyle",
        }
    }

    /// Parse a label name; unknown names yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|label| label.as_str() == value)
    }

    fn triggers(&self) -> &'static [&'static str] {
        match self {
            CategoryLabel::Gaming => &["game", "gaming", "playthrough", "walkthrough", "stream"],
            CategoryLabel::Music => &["music", "song", "album", "concert", "lyrics", "remix"],
            CategoryLabel::Tech => &[
                "tech",
                "review",
                "unboxing",
                "programming",
                "software",
                "computer",
                "smartphone",
            ],
            CategoryLabel::News => &["news", "breaking", "politics", "report", "nachrichten"],
            CategoryLabel::Education => &[
                "tutorial",
                "learn",
                "course",
                "lesson",
                "explained",
                "how to",
                "documentary",
            ],
            CategoryLabel::Entertainment => &[
                "funny", "comedy", "prank", "reaction", "challenge", "trailer", "movie",
            ],
            CategoryLabel::Sports => &[
                "sport",
                "football",
                "soccer",
                "basketball",
                "highlights",
                "fussball",
                "workout",
            ],
            CategoryLabel::Lifestyle => &[
                "lifestyle", "vlog", "travel", "recipe", "cooking", "fashion", "beauty",
            ],
        }
    }
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-category match counts over a set of texts.
///
/// One text increments every category it matches. Percentages are only
/// produced by an explicit [`CategoryDistribution::percentages`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    pub counts: BTreeMap<CategoryLabel, usize>,
    pub texts_analyzed: usize,
}

impl CategoryDistribution {
    /// Count for one category (0 if never matched)
    pub fn count(&self, label: CategoryLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Share of analyzed texts matching each category, in percent.
    ///
    /// Shares can add up to more than 100 because a text may match several
    /// categories. Empty input yields an empty map.
    pub fn percentages(&self) -> BTreeMap<CategoryLabel, f64> {
        if self.texts_analyzed == 0 {
            return BTreeMap::new();
        }
        let total = self.texts_analyzed as f64;
        self.counts
            .iter()
            .map(|(label, count)| (*label, *count as f64 * 100.0 / total))
            .collect()
    }
}

/// Substring-trigger classifier over the fixed taxonomy
#[derive(Debug, Clone)]
pub struct CategoryDetector {
    table: Vec<(CategoryLabel, Vec<String>)>,
}

impl Default for CategoryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryDetector {
    /// Create a detector with the built-in trigger table
    pub fn new() -> Self {
        let table = CategoryLabel::ALL
            .into_iter()
            .map(|label| {
                let triggers = label.triggers().iter().map(|t| t.to_string()).collect();
                (label, triggers)
            })
            .collect();
        Self { table }
    }

    /// Add extra lowercase triggers for a category
    pub fn with_triggers<I, S>(mut self, label: CategoryLabel, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some((_, existing)) = self.table.iter_mut().find(|(l, _)| *l == label) {
            existing.extend(
                triggers
                    .into_iter()
                    .map(|t| t.into().to_lowercase())
                    .filter(|t| !t.is_empty()),
            );
        }
        self
    }

    /// Every category with at least one trigger contained in the text
    pub fn detect(&self, text: &str) -> BTreeSet<CategoryLabel> {
        let lower = text.to_lowercase();
        self.table
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| lower.contains(t.as_str())))
            .map(|(label, _)| *label)
            .collect()
    }

    /// Raw category counts over many texts
    pub fn analyze_distribution<S: AsRef<str>>(&self, texts: &[S]) -> CategoryDistribution {
        let mut distribution = CategoryDistribution {
            texts_analyzed: texts.len(),
            ..CategoryDistribution::default()
        };
        for text in texts {
            for label in self.detect(text.as_ref()) {
                *distribution.counts.entry(label).or_insert(0) += 1;
            }
        }
        distribution
    }
}
