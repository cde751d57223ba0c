//! Batch analytics over watch history and scraped recommendations
//!
//! [`AnalyticsAggregator::analyze`] is a pure function of its inputs (plus the
//! shared read-only vocabulary) except for the result timestamp. Every call
//! allocates its own maps, so one aggregator can serve concurrent callers.

use super::channels::ChannelTally;
use super::engagement::analyze_engagement;
use super::results::AnalyticsResults;
use crate::category::{CategoryDetector, CategoryLabel};
use crate::errors::Result;
use crate::nlp::stopwords::StopwordSet;
use crate::nlp::tokenizer::Tokenizer;
use crate::phrase::extraction::PhraseExtractor;
use crate::tfidf::{batch_top_keywords, extract_keywords};
use crate::types::{AnalyticsConfig, VideoCandidate};
use rustc_hash::FxHashSet;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for an aggregation stage (when the `tracing` feature
/// is enabled). When disabled, this is a no-op.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("analytics_stage", stage = $name).entered();
    };
}

/// Separators between a video title and the channel or date appended to it
/// in a history entry
const HISTORY_TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " • ", "\n"];

/// History as handed in by the caller
enum History<'a> {
    /// Free text only: membership is decided by whole-title match
    Texts(Vec<String>),
    /// Full records: membership is decided by video id only
    Records(&'a [VideoCandidate]),
}

/// The title part of a free-text history entry, lowercased and trimmed
fn history_title(entry: &str) -> String {
    let end = HISTORY_TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| entry.find(sep))
        .min()
        .unwrap_or(entry.len());
    entry[..end].trim().to_lowercase()
}

/// Produces [`AnalyticsResults`] from history and candidates
#[derive(Debug, Clone)]
pub struct AnalyticsAggregator {
    tokenizer: Tokenizer,
    phrases: PhraseExtractor,
    categories: Arc<CategoryDetector>,
    config: AnalyticsConfig,
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        let stopwords = Arc::new(StopwordSet::default());
        Self {
            tokenizer: Tokenizer::new(stopwords.clone()),
            phrases: PhraseExtractor::new(stopwords),
            categories: Arc::new(CategoryDetector::default()),
            config: AnalyticsConfig::default(),
        }
    }
}

impl AnalyticsAggregator {
    /// Create an aggregator sharing the given vocabulary tables
    pub fn new(
        stopwords: Arc<StopwordSet>,
        categories: Arc<CategoryDetector>,
        config: AnalyticsConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tokenizer: Tokenizer::new(stopwords.clone()),
            phrases: PhraseExtractor::new(stopwords),
            categories,
            config,
        })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze free-text history entries together with scraped candidates
    pub fn analyze<S: AsRef<str>>(
        &self,
        history_texts: &[S],
        candidates: &[VideoCandidate],
    ) -> AnalyticsResults {
        let texts = history_texts.iter().map(|t| t.as_ref().to_string()).collect();
        self.run(History::Texts(texts), candidates)
    }

    /// Analyze history records (with urls and channels) together with
    /// scraped candidates. History records also count towards channel stats.
    pub fn analyze_with_history(
        &self,
        history: &[VideoCandidate],
        candidates: &[VideoCandidate],
    ) -> AnalyticsResults {
        self.run(History::Records(history), candidates)
    }

    fn run(&self, history: History<'_>, candidates: &[VideoCandidate]) -> AnalyticsResults {
        #[cfg(feature = "tracing")]
        tracing::debug!(candidates = candidates.len(), "running feed analytics");

        let history_texts: Vec<String> = match &history {
            History::Texts(texts) => texts.clone(),
            History::Records(records) => records.iter().map(VideoCandidate::text).collect(),
        };
        let history_count = history_texts.len();

        let mut texts = history_texts;
        texts.extend(candidates.iter().map(VideoCandidate::text));

        let top_keywords = {
            trace_stage!("keywords");
            let documents = self.tokenizer.tokenize_all(&texts);
            batch_top_keywords(&documents, self.config.top_keywords)
        };

        let top_phrases = {
            trace_stage!("phrases");
            self.phrases.extract(&texts).top(self.config.top_phrases)
        };

        let top_channels = {
            trace_stage!("channels");
            self.channel_stats(&history, &texts[..history_count], candidates)
        };

        let category_distribution = {
            trace_stage!("categories");
            self.categories.analyze_distribution(&texts)
        };

        let engagement_patterns = {
            trace_stage!("engagement");
            analyze_engagement(candidates)
        };

        AnalyticsResults {
            history_video_count: history_count,
            recommended_video_count: candidates.len(),
            top_keywords,
            top_phrases,
            top_channels,
            top_videos: candidates
                .iter()
                .take(self.config.top_videos)
                .cloned()
                .collect(),
            category_distribution,
            engagement_patterns,
            timestamp: chrono::Utc::now(),
        }
    }

    fn channel_stats(
        &self,
        history: &History<'_>,
        history_texts: &[String],
        candidates: &[VideoCandidate],
    ) -> Vec<super::channels::ChannelStats> {
        let mut tally = ChannelTally::new(self.config.max_channel_keywords);

        match history {
            History::Records(records) => {
                let mut history_ids: FxHashSet<String> = FxHashSet::default();
                for record in records.iter() {
                    if let Some(id) = record.video_id() {
                        history_ids.insert(id);
                    }
                    self.record_video(&mut tally, record, true);
                }
                for candidate in candidates {
                    let watched = candidate
                        .video_id()
                        .is_some_and(|id| history_ids.contains(&id));
                    self.record_video(&mut tally, candidate, watched);
                }
            }
            History::Texts(_) => {
                let history_titles: FxHashSet<String> = history_texts
                    .iter()
                    .map(|t| history_title(t))
                    .filter(|t| !t.is_empty())
                    .collect();
                for candidate in candidates {
                    let title = candidate.title.trim().to_lowercase();
                    let watched = !title.is_empty() && history_titles.contains(&title);
                    self.record_video(&mut tally, candidate, watched);
                }
            }
        }

        tally.finish(self.config.top_channels)
    }

    fn record_video(&self, tally: &mut ChannelTally, video: &VideoCandidate, in_history: bool) {
        let text = video.text();
        let mut categories = self.categories.detect(&text);
        if let Some(label) = video.category.as_deref().and_then(CategoryLabel::parse) {
            categories.insert(label);
        }
        let keywords = extract_keywords(&self.tokenizer, &text, self.config.channel_keywords);
        tally.record(&video.channel, in_history, &categories, keywords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, channel: &str, id: &str) -> VideoCandidate {
        VideoCandidate::new(title, channel)
            .with_url(format!("https://www.youtube.com/watch?v={id}"))
            .with_views("20K views")
    }

    fn sample() -> Vec<VideoCandidate> {
        vec![
            candidate("Rust async tutorial", "CodeChan", "r1"),
            candidate("Rust compiler internals", "CodeChan", "r2"),
            candidate("Pasta recipe cooking", "FoodChan", "f1"),
            candidate("Gaming stream highlights", "PlayChan", "g1"),
        ]
    }

    #[test]
    fn test_counts_and_limits() {
        let aggregator = AnalyticsAggregator::default();
        let results = aggregator.analyze(&["watched rust async tutorial"], &sample());

        assert_eq!(results.history_video_count, 1);
        assert_eq!(results.recommended_video_count, 4);
        assert!(results.top_keywords.len() <= 20);
        assert!(results.top_phrases.len() <= 15);
        assert_eq!(results.top_videos.len(), 4);
        assert_eq!(results.top_videos[0].title, "Rust async tutorial");
    }

    #[test]
    fn test_history_title() {
        assert_eq!(history_title("Rust async tutorial - CodeChan"), "rust async tutorial");
        assert_eq!(history_title("  Pasta | FoodChan - 3 days ago"), "pasta");
        assert_eq!(history_title("Plain Title"), "plain title");
    }

    #[test]
    fn test_channel_membership_by_whole_title() {
        let aggregator = AnalyticsAggregator::default();
        let results = aggregator.analyze(&["Rust async tutorial - CodeChan"], &sample());

        let code = results
            .top_channels
            .iter()
            .find(|c| c.channel == "CodeChan")
            .unwrap();
        assert_eq!(code.count, 2);
        assert_eq!(code.in_history, 1);
        assert_eq!(code.in_recommendations, 1);
        assert!((code.history_ratio - 0.5).abs() < 1e-12);
        assert!(code.categories.contains(&CategoryLabel::Education));
        assert!(code.keywords.contains("rust"));

        // Most frequent channel first
        assert_eq!(results.top_channels[0].channel, "CodeChan");
    }

    #[test]
    fn test_channel_membership_by_id() {
        let aggregator = AnalyticsAggregator::default();
        let history = vec![candidate("Renamed upload", "FoodChan", "f1")];
        let results = aggregator.analyze_with_history(&history, &sample());

        let food = results
            .top_channels
            .iter()
            .find(|c| c.channel == "FoodChan")
            .unwrap();
        // The history record itself plus the candidate matching its id
        assert_eq!(food.count, 2);
        assert_eq!(food.in_history, 2);
        assert_eq!(food.in_recommendations, 0);
        assert_eq!(results.history_video_count, 1);
    }

    #[test]
    fn test_short_title_not_matched_inside_history() {
        let aggregator = AnalyticsAggregator::default();
        let candidates = vec![candidate("Rust", "CodeChan", "r9")];
        let results = aggregator.analyze(&["Rust async tutorial - Ferris Academy"], &candidates);

        let code = &results.top_channels[0];
        assert_eq!(code.in_history, 0);
        assert_eq!(code.in_recommendations, 1);
    }

    #[test]
    fn test_records_membership_ignores_titles() {
        let aggregator = AnalyticsAggregator::default();
        let history = vec![candidate("Rust async tutorial", "Ferris Academy", "aaa")];
        let candidates = vec![candidate("Rust async tutorial", "CodeChan", "zzz")];
        let results = aggregator.analyze_with_history(&history, &candidates);

        let code = results
            .top_channels
            .iter()
            .find(|c| c.channel == "CodeChan")
            .unwrap();
        assert_eq!(code.in_history, 0);
        assert_eq!(code.in_recommendations, 1);
    }

    #[test]
    fn test_scraped_category_is_used() {
        let aggregator = AnalyticsAggregator::default();
        let candidates = vec![VideoCandidate::new("zzz", "Chan").with_category("Sports")];
        let results = aggregator.analyze(&[] as &[&str], &candidates);
        assert!(results.top_channels[0]
            .categories
            .contains(&CategoryLabel::Sports));
    }

    #[test]
    fn test_profile_phrase_cap() {
        let stopwords = Arc::new(StopwordSet::default());
        let aggregator = AnalyticsAggregator::new(
            stopwords,
            Arc::new(CategoryDetector::default()),
            AnalyticsConfig::profile(),
        )
        .unwrap();

        let candidates: Vec<VideoCandidate> = (0..30)
            .map(|i| candidate(&format!("topic{i} alpha{i} beta{i}"), "c", &i.to_string()))
            .collect();
        let results = aggregator.analyze(&[] as &[&str], &candidates);
        assert_eq!(results.top_phrases.len(), 10);
        assert_eq!(results.top_videos.len(), 20);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = AnalyticsAggregator::new(
            Arc::new(StopwordSet::default()),
            Arc::new(CategoryDetector::default()),
            AnalyticsConfig::default().with_top_phrases(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_inputs() {
        let aggregator = AnalyticsAggregator::default();
        let results = aggregator.analyze(&[] as &[&str], &[]);

        assert_eq!(results.history_video_count, 0);
        assert!(results.top_keywords.is_empty());
        assert!(results.top_phrases.is_empty());
        assert!(results.top_channels.is_empty());
        assert_eq!(results.category_distribution.texts_analyzed, 0);
    }
}
