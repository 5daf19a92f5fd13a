use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{Result, SpiralError};
use crate::types::{CommitSummary, DayStat};

/// Collapse commits into one entry per calendar date, ascending by date
pub fn aggregate_by_day(commits: &[CommitSummary]) -> Vec<DayStat> {
    let mut days: BTreeMap<NaiveDate, DayStat> = BTreeMap::new();

    for commit in commits {
        let day = days.entry(commit.date).or_insert_with(|| DayStat::new(commit.date));
        day.lines_added += commit.lines_added;
        day.lines_removed += commit.lines_removed;
        day.is_root_commit_day |= commit.is_root_commit;
        day.release_tier = day.release_tier.max(commit.release_tier);
    }

    days.into_values().collect()
}

/// Earliest and latest date across `days`
pub fn date_range(days: &[DayStat]) -> Result<(NaiveDate, NaiveDate)> {
    let start = days.iter().map(|day| day.date).min().ok_or(SpiralError::EmptyHistory)?;
    let end = days.iter().map(|day| day.date).max().ok_or(SpiralError::EmptyHistory)?;
    Ok((start, end))
}
