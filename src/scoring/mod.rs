//! Candidate scoring and watch selection
//!
//! - `views`: view-count and duration parsing
//! - `scorer`: additive per-candidate relevance scores and ranking
//! - `selection`: video ids, next-watch selection, profile strength

pub mod scorer;
pub mod selection;
pub mod views;

pub use scorer::{rank_candidates, score_video, ScoreBreakdown, VideoScorer};
pub use selection::{extract_video_id, profile_strength, select_next, DEFAULT_WATCH_LIMIT};
pub use views::{parse_duration_secs, parse_view_count};
