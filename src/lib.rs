//! # feedshaper
//!
//! Content-relevance scoring and text analytics for steering a video
//! recommendation feed.
//!
//! The crate scores scraped video candidates against a user-authored
//! preference profile, picks what to watch next, and summarizes watch
//! history and recommendations with TF-IDF keywords, n-gram phrases,
//! channel statistics, categories and engagement estimates.
//!
//! ## Features
//!
//! - **Deterministic**: scoring is a fixed additive rule set; analytics
//!   output is ordered by first occurrence wherever counts tie
//! - **Shared vocabulary**: stopword and category tables are built once and
//!   shared read-only across threads
//! - **Lenient input**: missing candidate fields default, malformed profile
//!   entries are dropped
//! - **Tracing**: stage spans and load events behind the default `tracing`
//!   feature
//!
//! ## Example
//!
//! ```
//! use feedshaper::{rank_candidates, PreferenceProfile, VideoCandidate};
//!
//! let profile = PreferenceProfile::new()
//!     .with_target_keywords(["rust"])
//!     .with_avoid_keywords(["drama"]);
//! let candidates = vec![
//!     VideoCandidate::new("Celebrity drama recap", "Gossip").with_views("2M views"),
//!     VideoCandidate::new("Rust ownership explained", "Ferris").with_views("40K views"),
//! ];
//!
//! let ranked = rank_candidates(&candidates, &profile);
//! assert_eq!(ranked[0].title, "Rust ownership explained");
//! ```

pub mod analytics;
pub mod category;
pub mod config;
pub mod errors;
pub mod nlp;
pub mod phrase;
pub mod scoring;
pub mod session;
pub mod tfidf;
pub mod types;

// Re-export commonly used types
pub use errors::{FeedError, Result};
pub use types::{
    AdvancedOptions, AnalyticsConfig, ChannelAction, ChannelPreference, Phrase,
    PreferenceProfile, ScoredVideo, VideoCandidate,
};

// Re-export main functionality
pub use analytics::{AnalyticsAggregator, AnalyticsResults, ChannelStats, EngagementPatterns};
pub use category::{CategoryDetector, CategoryDistribution, CategoryLabel};
pub use config::{
    load_presets, load_profile, load_vocabulary, PresetBundle, Vocabulary, VocabularyConfig,
};
pub use nlp::{Language, StopwordSet, Tokenizer};
pub use phrase::{extract_phrases, PhraseCounts, PhraseExtractor};
pub use scoring::{
    extract_video_id, parse_view_count, profile_strength, rank_candidates, score_video,
    select_next, ScoreBreakdown, VideoScorer, DEFAULT_WATCH_LIMIT,
};
pub use session::{PlannedWatch, WatchPlan, WatchSession};
pub use tfidf::{
    batch_top_keywords, compute_idf, compute_tf, compute_tfidf, extract_keywords, KeywordScore,
    TermStats,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
