//! History and recommendation analytics
//!
//! - `aggregator`: runs keyword, phrase, channel, category and engagement
//!   analysis over one batch
//! - `channels`: per-channel tallies
//! - `engagement`: watch-time buckets and content types
//! - `results`: the serializable snapshot

pub mod aggregator;
pub mod channels;
pub mod engagement;
pub mod results;

pub use aggregator::AnalyticsAggregator;
pub use channels::{ChannelStats, ChannelTally};
pub use engagement::{
    analyze_engagement, ContentTypes, EngagementPatterns, PeakHours, WatchTimeDistribution,
};
pub use results::AnalyticsResults;
