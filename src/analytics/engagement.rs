//! Engagement-pattern estimates from titles and durations
//!
//! Content types are assigned by substring checks on the title and are not
//! mutually exclusive: only the episodic check has an `else` (long-form), so
//! a live stream titled without "episode"/"part" counts as both live and
//! long-form.

use crate::scoring::views::parse_duration_secs;
use crate::types::VideoCandidate;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the short bucket, in seconds
pub const SHORT_MAX_SECS: u64 = 4 * 60;
/// Upper bound (inclusive) of the medium bucket, in seconds
pub const MEDIUM_MAX_SECS: u64 = 20 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchTimeDistribution {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypes {
    pub short: usize,
    pub live: usize,
    pub episodic: usize,
    pub long_form: usize,
}

/// Share of viewing per time of day, in percent.
///
/// No watch-time telemetry reaches this crate yet, so this is a fixed
/// estimate and `estimated` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHours {
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
    pub estimated: bool,
}

impl Default for PeakHours {
    fn default() -> Self {
        Self {
            morning: 15,
            afternoon: 25,
            evening: 45,
            night: 15,
            estimated: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementPatterns {
    pub watch_time_distribution: WatchTimeDistribution,
    pub content_types: ContentTypes,
    pub peak_hours: PeakHours,
}

/// Which content types a title counts towards
fn classify(title: &str, types: &mut ContentTypes) -> bool {
    let title = title.to_lowercase();
    let is_short = title.contains("short") || title.contains("shorts");
    if is_short {
        types.short += 1;
    }
    if title.contains("live") || title.contains("stream") {
        types.live += 1;
    }
    if title.contains("episode") || title.contains("part") {
        types.episodic += 1;
    } else {
        types.long_form += 1;
    }
    is_short
}

/// Estimate engagement patterns for a batch of candidates
pub fn analyze_engagement(candidates: &[VideoCandidate]) -> EngagementPatterns {
    let mut patterns = EngagementPatterns::default();

    for candidate in candidates {
        let is_short = classify(&candidate.title, &mut patterns.content_types);

        let buckets = &mut patterns.watch_time_distribution;
        match candidate.duration.as_deref().and_then(parse_duration_secs) {
            Some(secs) if secs < SHORT_MAX_SECS => buckets.short += 1,
            Some(secs) if secs <= MEDIUM_MAX_SECS => buckets.medium += 1,
            Some(_) => buckets.long += 1,
            None if is_short => buckets.short += 1,
            None => {}
        }
    }

    patterns
}
