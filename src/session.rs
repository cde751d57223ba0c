//! Watch-cycle bookkeeping
//!
//! A [`WatchSession`] owns the per-run counters and the set of already
//! watched video ids. It is plain owned state: callers that share one across
//! tasks wrap it in their own lock.

use crate::scoring::selection::{extract_video_id, select_next};
use crate::types::{ChannelAction, PreferenceProfile, ScoredVideo};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One video the automation should open, with what to do about its channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWatch {
    pub video: ScoredVideo,
    pub video_id: String,
    /// Actions of every channel rule matching the video's channel
    pub channel_actions: Vec<ChannelAction>,
}

/// Instructions for one watch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchPlan {
    pub targets: Vec<PlannedWatch>,
    pub playback_speed: f64,
    pub skip_ads: bool,
}

impl WatchPlan {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Counters and watched ids for one automation run
#[derive(Debug, Clone, Default)]
pub struct WatchSession {
    videos_watched: usize,
    cycles: usize,
    watched: FxHashSet<String>,
}

impl WatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up to `limit` unwatched videos from `ranked` and record them as
    /// watched.
    ///
    /// A cycle that finds nothing new still counts as a cycle.
    pub fn plan_cycle(
        &mut self,
        ranked: &[ScoredVideo],
        profile: &PreferenceProfile,
        limit: usize,
    ) -> WatchPlan {
        let picks = select_next(ranked, &self.watched, limit);
        let mut targets = Vec::with_capacity(picks.len());

        for video in picks {
            let Some(video_id) = video.candidate.video_id() else {
                continue;
            };
            self.watched.insert(video_id.clone());
            self.videos_watched += 1;
            let channel_actions = profile.channel_actions_for(&video.channel);
            targets.push(PlannedWatch {
                video,
                video_id,
                channel_actions,
            });
        }
        self.cycles += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cycle = self.cycles,
            targets = targets.len(),
            total_watched = self.videos_watched,
            "planned watch cycle"
        );

        WatchPlan {
            targets,
            playback_speed: profile.advanced_options.playback_speed,
            skip_ads: profile.advanced_options.skip_ads,
        }
    }

    /// Mark a video watched outside of a planned cycle.
    ///
    /// Returns false when the url has no video id or it was already watched.
    pub fn record_watched(&mut self, url: &str) -> bool {
        let Some(id) = extract_video_id(url) else {
            return false;
        };
        if !self.watched.insert(id) {
            return false;
        }
        self.videos_watched += 1;
        true
    }

    pub fn has_watched(&self, video_id: &str) -> bool {
        self.watched.contains(video_id)
    }

    /// Watched ids in no particular order
    pub fn watched_ids(&self) -> impl Iterator<Item = &str> {
        self.watched.iter().map(String::as_str)
    }

    pub fn videos_watched(&self) -> usize {
        self.videos_watched
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }
}
