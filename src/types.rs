//! Core types for feedshaper
//!
//! This module defines the records exchanged with the scraping, storage and
//! UI collaborators (candidates, preference profiles, scored videos) and the
//! analytics configuration.

use crate::errors::{FeedError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Video Candidate
// ============================================================================

/// A raw scraped video record.
///
/// Produced by the scraper and consumed read-only by this crate. Every string
/// field defaults to empty when absent so partially scraped records still
/// score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCandidate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    /// Category label reported by the page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Position in the scraped feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Raw view-count text, e.g. "1.2M views"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
    /// Raw duration text, e.g. "12:04" or "1:02:33"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl VideoCandidate {
    /// Create a candidate with a title and channel
    pub fn new(title: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            channel: channel.into(),
            ..Self::default()
        }
    }

    /// Builder method: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method: set raw view-count text
    pub fn with_views(mut self, views: impl Into<String>) -> Self {
        self.views = Some(views.into());
        self
    }

    /// Builder method: set raw duration text
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Builder method: set scraped category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method: set feed position
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// The text blob used for analysis: `title channel description`
    pub fn text(&self) -> String {
        format!("{} {} {}", self.title, self.channel, self.description)
    }

    /// The platform video identifier extracted from the url
    pub fn video_id(&self) -> Option<String> {
        crate::scoring::selection::extract_video_id(&self.url)
    }
}

// ============================================================================
// Preference Profile
// ============================================================================

/// What the automation should do about a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelAction {
    Subscribe,
    Avoid,
    Block,
    Prioritize,
}

impl ChannelAction {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "subscribe" => Some(ChannelAction::Subscribe),
            "avoid" => Some(ChannelAction::Avoid),
            "block" => Some(ChannelAction::Block),
            "prioritize" | "prioritise" => Some(ChannelAction::Prioritize),
            _ => None,
        }
    }

    /// Get the lowercase action name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelAction::Subscribe => "subscribe",
            ChannelAction::Avoid => "avoid",
            ChannelAction::Block => "block",
            ChannelAction::Prioritize => "prioritize",
        }
    }
}

impl std::str::FromStr for ChannelAction {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self> {
        ChannelAction::parse(value)
            .ok_or_else(|| FeedError::invalid_config(format!("unknown channel action '{value}'")))
    }
}

/// A rule matching channels whose name contains `channel_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPreference {
    pub channel_name: String,
    pub action: ChannelAction,
}

impl ChannelPreference {
    pub fn new(channel_name: impl Into<String>, action: ChannelAction) -> Self {
        Self {
            channel_name: channel_name.into(),
            action,
        }
    }

    /// Case-insensitive substring match against a channel name.
    /// An empty rule name never matches.
    pub fn matches(&self, channel: &str) -> bool {
        let needle = self.channel_name.trim().to_lowercase();
        !needle.is_empty() && channel.to_lowercase().contains(&needle)
    }
}

/// Playback settings handed through to the automation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedOptions {
    /// Fraction of watched videos to like/interact with, in [0, 1]
    pub engagement_rate: f64,
    /// Playback speed multiplier
    pub playback_speed: f64,
    pub skip_ads: bool,
}

impl Default for AdvancedOptions {
    fn default() -> Self {
        Self {
            engagement_rate: 0.0,
            playback_speed: 1.0,
            skip_ads: false,
        }
    }
}

impl AdvancedOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.engagement_rate) {
            return Err(FeedError::invalid_config(format!(
                "engagementRate must be between 0 and 1, got {}",
                self.engagement_rate
            )));
        }
        if !(self.playback_speed > 0.0 && self.playback_speed <= 16.0) {
            return Err(FeedError::invalid_config(format!(
                "playbackSpeed must be in (0, 16], got {}",
                self.playback_speed
            )));
        }
        Ok(())
    }
}

/// A user-authored preset describing desired and avoided content.
///
/// Deserialization is lenient: malformed list entries (non-string keywords,
/// pairs without exactly two strings, channel rules with an unknown action)
/// are dropped, and a mistyped name or advanced option falls back to its
/// default, instead of failing the whole profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    #[serde(
        default,
        deserialize_with = "lenient_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub target_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub avoid_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_channel_preferences")]
    pub channel_preferences: Vec<ChannelPreference>,
    #[serde(default, deserialize_with = "lenient_pairs")]
    pub negative_pairs: Vec<[String; 2]>,
    #[serde(default, deserialize_with = "lenient_advanced_options")]
    pub advanced_options: AdvancedOptions,
}

impl PreferenceProfile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set target keywords
    pub fn with_target_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set avoid keywords
    pub fn with_avoid_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.avoid_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: add a channel rule
    pub fn with_channel(mut self, channel_name: impl Into<String>, action: ChannelAction) -> Self {
        self.channel_preferences
            .push(ChannelPreference::new(channel_name, action));
        self
    }

    /// Builder method: add a negative keyword pair
    pub fn with_negative_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.negative_pairs.push([a.into(), b.into()]);
        self
    }

    /// Builder method: set advanced options
    pub fn with_advanced_options(mut self, options: AdvancedOptions) -> Self {
        self.advanced_options = options;
        self
    }

    /// Actions of every channel rule matching `channel`, in rule order
    pub fn channel_actions_for(&self, channel: &str) -> Vec<ChannelAction> {
        self.channel_preferences
            .iter()
            .filter(|pref| pref.matches(channel))
            .map(|pref| pref.action)
            .collect()
    }

    /// Validate the parts of the profile that have a bounded range
    pub fn validate(&self) -> Result<()> {
        self.advanced_options.validate()
    }
}

fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        _other => {
            #[cfg(feature = "tracing")]
            tracing::warn!(value = %_other, "expected a list in preference profile, ignoring");
            Vec::new()
        }
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = lenient_list(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _other => {
                #[cfg(feature = "tracing")]
                tracing::warn!(entry = %_other, "dropping non-string keyword");
                None
            }
        })
        .collect())
}

fn lenient_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<[String; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = lenient_list(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Array(ref pair) => match pair.as_slice() {
                [Value::String(a), Value::String(b)] => Some([a.clone(), b.clone()]),
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(entry = %item, "dropping negative pair without two strings");
                    None
                }
            },
            _other => {
                #[cfg(feature = "tracing")]
                tracing::warn!(entry = %_other, "dropping negative pair that is not a list");
                None
            }
        })
        .collect())
}

fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => Some(name),
        Value::Null => None,
        _other => {
            #[cfg(feature = "tracing")]
            tracing::warn!(value = %_other, "ignoring non-string profile name");
            None
        }
    })
}

/// Each mistyped option falls back to its default; a non-object falls back
/// entirely
fn lenient_advanced_options<'de, D>(deserializer: D) -> std::result::Result<AdvancedOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let mut options = AdvancedOptions::default();
    let fields = match Value::deserialize(deserializer)? {
        Value::Object(fields) => fields,
        Value::Null => return Ok(options),
        _other => {
            #[cfg(feature = "tracing")]
            tracing::warn!(value = %_other, "expected an object for advancedOptions, using defaults");
            return Ok(options);
        }
    };

    for (key, value) in &fields {
        let applied = match (key.as_str(), value) {
            ("engagementRate", Value::Number(n)) => n.as_f64().map(|v| options.engagement_rate = v),
            ("playbackSpeed", Value::Number(n)) => n.as_f64().map(|v| options.playback_speed = v),
            ("skipAds", Value::Bool(v)) => {
                options.skip_ads = *v;
                Some(())
            }
            ("engagementRate" | "playbackSpeed" | "skipAds", _) => None,
            _ => Some(()),
        };
        if applied.is_none() {
            #[cfg(feature = "tracing")]
            tracing::warn!(option = %key, value = %value, "ignoring mistyped advanced option");
        }
    }

    Ok(options)
}

fn lenient_channel_preferences<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<ChannelPreference>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = lenient_list(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| {
            let name = item.get("channelName")?.as_str()?;
            let action = ChannelAction::parse(item.get("action")?.as_str()?);
            if action.is_none() {
                #[cfg(feature = "tracing")]
                tracing::warn!(channel = name, "dropping channel rule with unknown action");
            }
            Some(ChannelPreference::new(name, action?))
        })
        .collect())
}

// ============================================================================
// Phrase
// ============================================================================

/// A multi-word phrase with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    /// Lowercase words joined by single spaces
    pub text: String,
    /// Number of occurrences across all analyzed texts
    pub count: usize,
}

impl Phrase {
    pub fn new(text: impl Into<String>, count: usize) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}

// ============================================================================
// Scored Video
// ============================================================================

/// A candidate with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredVideo {
    pub candidate: VideoCandidate,
    pub score: i64,
    pub title: String,
    pub channel: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Result-size limits for the analytics aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of batch TF-IDF keywords to report
    pub top_keywords: usize,
    /// Number of phrases to report
    pub top_phrases: usize,
    /// Number of channels to report
    pub top_channels: usize,
    /// Number of candidates listed in scrape order
    pub top_videos: usize,
    /// Keywords extracted from each video for its channel
    pub channel_keywords: usize,
    /// Upper bound on keywords kept per channel
    pub max_channel_keywords: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::aggregate()
    }
}

impl AnalyticsConfig {
    /// Limits used when analyzing a single profile's feed (10 phrases)
    pub fn profile() -> Self {
        Self {
            top_keywords: 20,
            top_phrases: 10,
            top_channels: 20,
            top_videos: 20,
            channel_keywords: 5,
            max_channel_keywords: 10,
        }
    }

    /// Limits used by the aggregate history analyzer (15 phrases)
    pub fn aggregate() -> Self {
        Self {
            top_phrases: 15,
            ..Self::profile()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.top_keywords == 0 {
            return Err(FeedError::invalid_config("top_keywords must be > 0"));
        }
        if self.top_phrases == 0 {
            return Err(FeedError::invalid_config("top_phrases must be > 0"));
        }
        if self.top_channels == 0 {
            return Err(FeedError::invalid_config("top_channels must be > 0"));
        }
        if self.max_channel_keywords < self.channel_keywords {
            return Err(FeedError::invalid_config(
                "max_channel_keywords must be >= channel_keywords",
            ));
        }
        Ok(())
    }

    /// Builder method: set keyword limit
    pub fn with_top_keywords(mut self, n: usize) -> Self {
        self.top_keywords = n;
        self
    }

    /// Builder method: set phrase limit
    pub fn with_top_phrases(mut self, n: usize) -> Self {
        self.top_phrases = n;
        self
    }

    /// Builder method: set channel limit
    pub fn with_top_channels(mut self, n: usize) -> Self {
        self.top_channels = n;
        self
    }

    /// Builder method: set video listing limit
    pub fn with_top_videos(mut self, n: usize) -> Self {
        self.top_videos = n;
        self
    }
}
