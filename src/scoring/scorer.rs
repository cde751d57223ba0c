//! Additive relevance scoring of video candidates
//!
//! Every rule adds or subtracts a fixed number of points; there is no
//! randomness, so the same candidate and profile always score the same.

use super::views::{parse_view_count, HIGH_VIEWS_THRESHOLD, LOW_VIEWS_THRESHOLD};
use crate::types::{ChannelAction, PreferenceProfile, ScoredVideo, VideoCandidate};
use rayon::prelude::*;

/// Points per target keyword found in the title
pub const TARGET_KEYWORD_POINTS: i64 = 15;
/// Points per avoid keyword found in the title
pub const AVOID_KEYWORD_POINTS: i64 = -30;
/// Points for an avoided or blocked channel
pub const BLOCKED_CHANNEL_POINTS: i64 = -1000;
/// Points for a prioritized channel
pub const PRIORITY_CHANNEL_POINTS: i64 = 50;
/// Points for a video with fewer than 1,000 views
pub const LOW_VIEWS_POINTS: i64 = -50;
/// Points for a video with more than 100,000 views
pub const HIGH_VIEWS_POINTS: i64 = 5;
/// Points per negative pair fully contained in the title
pub const NEGATIVE_PAIR_POINTS: i64 = -500;

/// Batches at least this large are scored on the rayon pool
const PARALLEL_THRESHOLD: usize = 256;

/// Per-rule contributions to a candidate's score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub keywords: i64,
    pub channel: i64,
    pub quality: i64,
    pub negative_pairs: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.keywords + self.channel + self.quality + self.negative_pairs
    }
}

/// Scores candidates against one preference profile
#[derive(Debug, Clone)]
pub struct VideoScorer<'p> {
    profile: &'p PreferenceProfile,
}

impl<'p> VideoScorer<'p> {
    pub fn new(profile: &'p PreferenceProfile) -> Self {
        Self { profile }
    }

    /// Compute the per-rule contributions for one candidate
    pub fn breakdown(&self, candidate: &VideoCandidate) -> ScoreBreakdown {
        let title = candidate.title.to_lowercase();
        let channel = candidate.channel.to_lowercase();

        let keywords = count_contained(&title, &self.profile.target_keywords)
            * TARGET_KEYWORD_POINTS
            + count_contained(&title, &self.profile.avoid_keywords) * AVOID_KEYWORD_POINTS;

        let channel_points = self
            .profile
            .channel_preferences
            .iter()
            .filter(|pref| pref.matches(&channel))
            .map(|pref| match pref.action {
                ChannelAction::Avoid | ChannelAction::Block => BLOCKED_CHANNEL_POINTS,
                ChannelAction::Prioritize => PRIORITY_CHANNEL_POINTS,
                ChannelAction::Subscribe => 0,
            })
            .sum();

        let views = parse_view_count(candidate.views.as_deref().unwrap_or(""));
        let quality = if views < LOW_VIEWS_THRESHOLD {
            LOW_VIEWS_POINTS
        } else if views > HIGH_VIEWS_THRESHOLD {
            HIGH_VIEWS_POINTS
        } else {
            0
        };

        let pairs = self
            .profile
            .negative_pairs
            .iter()
            .filter(|[a, b]| contains_keyword(&title, a) && contains_keyword(&title, b))
            .count() as i64;

        ScoreBreakdown {
            keywords,
            channel: channel_points,
            quality,
            negative_pairs: pairs * NEGATIVE_PAIR_POINTS,
        }
    }

    /// Score one candidate without modifying it
    pub fn score(&self, candidate: &VideoCandidate) -> ScoredVideo {
        ScoredVideo {
            candidate: candidate.clone(),
            score: self.breakdown(candidate).total(),
            title: candidate.title.clone(),
            channel: candidate.channel.clone(),
        }
    }

    /// Score a batch, preserving input order
    pub fn score_all(&self, candidates: &[VideoCandidate]) -> Vec<ScoredVideo> {
        if candidates.len() >= PARALLEL_THRESHOLD {
            candidates.par_iter().map(|c| self.score(c)).collect()
        } else {
            candidates.iter().map(|c| self.score(c)).collect()
        }
    }

    /// Score a batch and sort it descending by score.
    ///
    /// The sort is stable, so equal scores keep scrape order.
    pub fn rank(&self, candidates: &[VideoCandidate]) -> Vec<ScoredVideo> {
        let mut scored = self.score_all(candidates);
        sort_by_score(&mut scored);
        scored
    }
}

/// Score one candidate against a profile
pub fn score_video(candidate: &VideoCandidate, profile: &PreferenceProfile) -> ScoredVideo {
    VideoScorer::new(profile).score(candidate)
}

/// Score and rank a batch against a profile
pub fn rank_candidates(candidates: &[VideoCandidate], profile: &PreferenceProfile) -> Vec<ScoredVideo> {
    VideoScorer::new(profile).rank(candidates)
}

/// Stable descending sort by score
pub fn sort_by_score(scored: &mut [ScoredVideo]) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Case-insensitive containment; an empty keyword never matches.
/// `haystack` must already be lowercase.
pub(crate) fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    !needle.is_empty() && haystack.contains(&needle)
}

fn count_contained(haystack: &str, keywords: &[String]) -> i64 {
    keywords
        .iter()
        .filter(|k| contains_keyword(haystack, k))
        .count() as i64
}
