//! Per-channel statistics accumulated over one aggregation pass

use crate::category::CategoryLabel;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How often a channel appeared and what it publishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub channel: String,
    pub count: usize,
    pub in_history: usize,
    pub in_recommendations: usize,
    pub categories: BTreeSet<CategoryLabel>,
    pub keywords: BTreeSet<String>,
    /// `in_history / count`
    pub history_ratio: f64,
    /// `in_recommendations / count`
    pub recommendation_ratio: f64,
}

impl ChannelStats {
    fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            count: 0,
            in_history: 0,
            in_recommendations: 0,
            categories: BTreeSet::new(),
            keywords: BTreeSet::new(),
            history_ratio: 0.0,
            recommendation_ratio: 0.0,
        }
    }
}

/// Accumulates [`ChannelStats`] in order of first appearance
#[derive(Debug, Clone)]
pub struct ChannelTally {
    index: FxHashMap<String, usize>,
    stats: Vec<ChannelStats>,
    max_keywords: usize,
}

impl ChannelTally {
    /// Create a tally keeping at most `max_keywords` keywords per channel
    pub fn new(max_keywords: usize) -> Self {
        Self {
            index: FxHashMap::default(),
            stats: Vec::new(),
            max_keywords,
        }
    }

    /// Record one video of `channel`. Blank channel names are ignored.
    pub fn record<I>(
        &mut self,
        channel: &str,
        in_history: bool,
        categories: &BTreeSet<CategoryLabel>,
        keywords: I,
    ) where
        I: IntoIterator<Item = String>,
    {
        let channel = channel.trim();
        if channel.is_empty() {
            return;
        }

        let idx = match self.index.get(channel) {
            Some(&idx) => idx,
            None => {
                self.index.insert(channel.to_string(), self.stats.len());
                self.stats.push(ChannelStats::new(channel));
                self.stats.len() - 1
            }
        };

        let entry = &mut self.stats[idx];
        entry.count += 1;
        if in_history {
            entry.in_history += 1;
        } else {
            entry.in_recommendations += 1;
        }
        entry.categories.extend(categories.iter().copied());
        for keyword in keywords {
            if entry.keywords.len() >= self.max_keywords {
                break;
            }
            entry.keywords.insert(keyword);
        }
    }

    /// Number of distinct channels seen
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The `top_n` channels by count (stable on first appearance), with
    /// ratios filled in
    pub fn finish(self, top_n: usize) -> Vec<ChannelStats> {
        let mut stats = self.stats;
        for entry in &mut stats {
            let count = entry.count as f64;
            entry.history_ratio = entry.in_history as f64 / count;
            entry.recommendation_ratio = entry.in_recommendations as f64 / count;
        }
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        stats.truncate(top_n);
        stats
    }
}
