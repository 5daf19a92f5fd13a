//! # Common Types
//!
//! This module contains the data types shared by history collection, aggregation
//! and rendering: per-commit summaries and their per-day aggregates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a release tag by which version component changed.
///
/// Variants are declared in ascending order of significance so that the derived
/// `Ord` lets aggregation pick the most significant release of a day with `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseTier {
    /// No release tag
    #[default]
    None,
    /// Only the patch component changed
    Patch,
    /// The minor component changed
    Minor,
    /// The major component changed
    Major,
}

impl ReleaseTier {
    /// Whether releases of this tier get a marker on the spiral.
    pub fn is_marked(self) -> bool {
        matches!(self, ReleaseTier::Major | ReleaseTier::Minor)
    }
}

/// Line statistics of a single commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Author date, in the author's own UTC offset
    pub date: NaiveDate,
    /// Lines inserted relative to the first parent
    pub lines_added: u64,
    /// Lines deleted relative to the first parent
    pub lines_removed: u64,
    /// True for the commit at the end of the first-parent chain
    pub is_root_commit: bool,
    /// Most significant release tag pointing at this commit
    pub release_tier: ReleaseTier,
}

/// One calendar date's aggregated activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStat {
    pub date: NaiveDate,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub is_root_commit_day: bool,
    pub release_tier: ReleaseTier,
}

impl DayStat {
    /// An empty day on `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            lines_added: 0,
            lines_removed: 0,
            is_root_commit_day: false,
            release_tier: ReleaseTier::None,
        }
    }

    /// The larger of lines added and lines removed; drives the circle radius.
    pub fn magnitude(&self) -> u64 {
        self.lines_added.max(self.lines_removed)
    }

    /// Whether the day grew the code base (or kept it level).
    pub fn is_net_growth(&self) -> bool {
        self.lines_added >= self.lines_removed
    }
}
