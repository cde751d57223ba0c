//! Picking what to watch next
//!
//! Candidates are identified by the platform video id parsed from their url.
//! "Already watched" is decided by exact id match only, never by title.

use super::scorer::contains_keyword;
use crate::types::{PreferenceProfile, ScoredVideo, VideoCandidate};
use rustc_hash::FxHashSet;

/// Default number of videos picked per watch cycle
pub const DEFAULT_WATCH_LIMIT: usize = 3;

/// Path prefixes that are followed directly by a video id
const ID_PATH_PREFIXES: &[&str] = &["/shorts/", "/embed/", "/live/", "/v/"];

/// Extract the platform video id from a url.
///
/// Supports `watch?v=ID` (in any query position), `youtu.be/ID` and the
/// `/shorts/`, `/embed/`, `/live/` path forms.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if let Some((_, query)) = url.split_once('?') {
        let query = query.split('#').next().unwrap_or("");
        for pair in query.split('&') {
            if let Some(id) = pair.strip_prefix("v=") {
                return non_empty(id);
            }
        }
    }

    if let Some(idx) = url.find("youtu.be/") {
        return non_empty(&url[idx + "youtu.be/".len()..]);
    }

    for prefix in ID_PATH_PREFIXES {
        if let Some(idx) = url.find(prefix) {
            return non_empty(&url[idx + prefix.len()..]);
        }
    }

    None
}

fn non_empty(rest: &str) -> Option<String> {
    let id = rest
        .split(|c: char| matches!(c, '&' | '?' | '#' | '/'))
        .next()
        .unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Take the first `limit` ranked videos whose id is not in `watched`.
///
/// Videos without a parsable id are skipped, and an id is taken at most once
/// even if the batch lists it twice.
pub fn select_next(
    ranked: &[ScoredVideo],
    watched: &FxHashSet<String>,
    limit: usize,
) -> Vec<ScoredVideo> {
    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut picks = Vec::new();

    for video in ranked {
        if picks.len() >= limit {
            break;
        }
        let Some(id) = video.candidate.video_id() else {
            continue;
        };
        if watched.contains(&id) || !taken.insert(id) {
            continue;
        }
        picks.push(video.clone());
    }

    picks
}

/// Percentage (0-100) of candidates whose title contains at least one target
/// keyword.
///
/// This is the "bubble score": how strongly the observed feed already
/// reflects the profile. Zero for an empty batch or a profile without
/// target keywords.
pub fn profile_strength(candidates: &[VideoCandidate], profile: &PreferenceProfile) -> f64 {
    if candidates.is_empty() || profile.target_keywords.is_empty() {
        return 0.0;
    }

    let matching = candidates
        .iter()
        .filter(|c| {
            let title = c.title.to_lowercase();
            profile
                .target_keywords
                .iter()
                .any(|k| contains_keyword(&title, k))
        })
        .count();

    matching as f64 * 100.0 / candidates.len() as f64
}
