//! The aggregate analytics snapshot handed to the UI and storage layers

use super::channels::ChannelStats;
use super::engagement::EngagementPatterns;
use crate::category::{CategoryDistribution, CategoryLabel};
use crate::errors::Result;
use crate::tfidf::KeywordScore;
use crate::types::{Phrase, VideoCandidate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one analysis pass over history and recommendations.
///
/// `category_distribution` always holds raw counts; call
/// [`AnalyticsResults::category_percentages`] for the normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResults {
    pub history_video_count: usize,
    pub recommended_video_count: usize,
    pub top_keywords: Vec<KeywordScore>,
    pub top_phrases: Vec<Phrase>,
    pub top_channels: Vec<ChannelStats>,
    pub top_videos: Vec<VideoCandidate>,
    pub category_distribution: CategoryDistribution,
    pub engagement_patterns: EngagementPatterns,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsResults {
    /// Percentage of analyzed texts per category
    pub fn category_percentages(&self) -> BTreeMap<CategoryLabel, f64> {
        self.category_distribution.percentages()
    }

    /// Keyword terms only, best first
    pub fn keyword_terms(&self) -> Vec<&str> {
        self.top_keywords.iter().map(|k| k.term.as_str()).collect()
    }

    /// Serialize to JSON for the storage or UI collaborator
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a previously stored snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
