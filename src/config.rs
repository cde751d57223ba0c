//! Configuration loading
//!
//! The vocabulary (stopwords and category triggers) and the preference
//! presets are read once by the composition root and handed out explicitly.
//! Everything here validates eagerly so a bad file fails at startup rather
//! than in the middle of a scoring pass.

use crate::analytics::aggregator::AnalyticsAggregator;
use crate::category::CategoryDetector;
use crate::errors::{FeedError, Result};
use crate::nlp::stopwords::{Language, StopwordSet};
use crate::nlp::tokenizer::Tokenizer;
use crate::phrase::extraction::PhraseExtractor;
use crate::types::{AnalyticsConfig, PreferenceProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Vocabulary
// ============================================================================

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "de".to_string()]
}

/// Serialized form of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl VocabularyConfig {
    /// Parsed language list; unknown codes are an error
    pub fn parsed_languages(&self) -> Result<Vec<Language>> {
        if self.languages.is_empty() {
            return Err(FeedError::invalid_config("at least one language is required"));
        }
        self.languages.iter().map(|code| Language::parse(code)).collect()
    }
}

/// Shared read-only tables used by tokenization, phrases and categories
#[derive(Debug, Clone)]
pub struct Vocabulary {
    stopwords: Arc<StopwordSet>,
    categories: Arc<CategoryDetector>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stopwords: Arc::new(StopwordSet::default()),
            categories: Arc::new(CategoryDetector::default()),
        }
    }
}

impl Vocabulary {
    /// Build the vocabulary from its configuration
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        let languages = config.parsed_languages()?;
        let stopwords = StopwordSet::with_additional(&languages, &config.extra_stopwords);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            languages = ?config.languages,
            stopwords = stopwords.len(),
            "built vocabulary"
        );

        Ok(Self {
            stopwords: Arc::new(stopwords),
            categories: Arc::new(CategoryDetector::default()),
        })
    }

    /// Replace the category detector, e.g. one with extra triggers
    pub fn with_categories(mut self, categories: CategoryDetector) -> Self {
        self.categories = Arc::new(categories);
        self
    }

    pub fn stopwords(&self) -> &Arc<StopwordSet> {
        &self.stopwords
    }

    pub fn categories(&self) -> &Arc<CategoryDetector> {
        &self.categories
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.stopwords.clone())
    }

    pub fn phrase_extractor(&self) -> PhraseExtractor {
        PhraseExtractor::new(self.stopwords.clone())
    }

    /// An aggregator sharing this vocabulary
    pub fn aggregator(&self, config: AnalyticsConfig) -> Result<AnalyticsAggregator> {
        AnalyticsAggregator::new(self.stopwords.clone(), self.categories.clone(), config)
    }
}

/// Load a vocabulary from a JSON file
pub fn load_vocabulary(path: impl AsRef<Path>) -> Result<Vocabulary> {
    let config: VocabularyConfig = serde_json::from_str(&read_file(path.as_ref())?)?;
    Vocabulary::from_config(&config)
}

// ============================================================================
// Presets
// ============================================================================

impl PreferenceProfile {
    /// Parse and validate a single profile
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: PreferenceProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Load a single profile from a JSON file
pub fn load_profile(path: impl AsRef<Path>) -> Result<PreferenceProfile> {
    let path = path.as_ref();
    let profile = PreferenceProfile::from_json(&read_file(path)?)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        path = %path.display(),
        targets = profile.target_keywords.len(),
        channels = profile.channel_preferences.len(),
        "loaded preference profile"
    );

    Ok(profile)
}

/// A named collection of preference presets, `{ "presets": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetBundle {
    #[serde(default)]
    pub presets: Vec<PreferenceProfile>,
}

impl PresetBundle {
    /// Parse a bundle, validating every preset
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: PresetBundle = serde_json::from_str(json)?;
        for (idx, preset) in bundle.presets.iter().enumerate() {
            preset.validate().map_err(|err| {
                let name = preset.name.as_deref().unwrap_or("<unnamed>");
                FeedError::invalid_config(format!("preset {idx} ({name}): {err}"))
            })?;
        }
        Ok(bundle)
    }

    /// Look up a preset by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<&PreferenceProfile> {
        self.presets
            .iter()
            .find(|p| {
                p.name
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| FeedError::unknown_preset(name))
    }

    /// Names of all named presets, in file order
    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().filter_map(|p| p.name.as_deref()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Load a preset bundle from a JSON file
pub fn load_presets(path: impl AsRef<Path>) -> Result<PresetBundle> {
    let path = path.as_ref();
    let bundle = PresetBundle::from_json(&read_file(path)?)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), presets = bundle.len(), "loaded presets");

    Ok(bundle)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| FeedError::io(path.display().to_string(), err))
}
