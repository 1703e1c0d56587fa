//! Per-post click ledger kept alongside the posts collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::post::PostId;

/// Click counts keyed by post id.
///
/// Serialized as a JSON object with stringified ids, e.g. `{"1700000000000": 4}`.
/// Entries outlive the posts they refer to: deleting a post keeps its history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Analytics {
    clicks: BTreeMap<PostId, u64>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new ledger with one more click recorded for `id`.
    pub fn record_click(&self, id: PostId) -> Self {
        let mut clicks = self.clicks.clone();
        let counter = clicks.entry(id).or_insert(0);
        *counter = counter.saturating_add(1);
        Self { clicks }
    }

    pub fn clicks_for(&self, id: PostId) -> u64 {
        self.clicks.get(&id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.clicks.values().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostId, u64)> + '_ {
        self.clicks.iter().map(|(id, count)| (*id, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty()
    }
}
