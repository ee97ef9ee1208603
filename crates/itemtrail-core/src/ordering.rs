// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Display orderings and replay instructions
//!
//! Display order follows the configured [`SortDirection`]. Replay order (the
//! order commits would be cherry-picked in) is always oldest first.

use std::cmp::Reverse;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::record::CommitRecord;
use crate::store::CommitStore;

/// Direction of a date ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Oldest first
    #[default]
    Ascending,
    /// Newest first
    Descending,
}

impl SortDirection {
    /// `Descending` if `descending`, else `Ascending`
    #[must_use]
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// Lowercase name, as used in report headings
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Stable sort by commit date; ties keep their current order
pub fn sort_by_date(records: &mut [&CommitRecord], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by_key(|r| r.date),
        SortDirection::Descending => records.sort_by_key(|r| Reverse(r.date)),
    }
}

/// Every stored record, sorted by date
#[must_use]
pub fn flat_order(store: &CommitStore, direction: SortDirection) -> Vec<&CommitRecord> {
    let mut records: Vec<&CommitRecord> = store.records().iter().collect();
    sort_by_date(&mut records, direction);
    records
}

/// Commits collected for one tracked item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup<'a> {
    /// The tracked item
    pub item: &'a str,
    /// Its commits, in display order
    pub commits: Vec<&'a CommitRecord>,
}

impl ItemGroup<'_> {
    /// True if no commit was found for the item
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Date of the oldest commit in the group
    #[must_use]
    pub fn earliest(&self) -> Option<DateTime<FixedOffset>> {
        self.commits.iter().map(|r| r.date).min()
    }

    /// Date of the newest commit in the group
    #[must_use]
    pub fn latest(&self) -> Option<DateTime<FixedOffset>> {
        self.commits.iter().map(|r| r.date).max()
    }
}

/// One group per tracked item, in date order
///
/// Ascending: groups ordered by their earliest commit, oldest first.
/// Descending: groups ordered by their latest commit, newest first, so the
/// most recently active items come first. Items without commits go last, in
/// the order given.
#[must_use]
pub fn grouped_order<'a, S: AsRef<str>>(
    store: &'a CommitStore,
    items: &'a [S],
    direction: SortDirection,
) -> Vec<ItemGroup<'a>> {
    let mut groups: Vec<ItemGroup<'a>> = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            let mut commits = store.records_for(item);
            sort_by_date(&mut commits, direction);
            ItemGroup { item, commits }
        })
        .collect();

    match direction {
        // `None` sorts before `Some`, so empty groups are keyed separately
        SortDirection::Ascending => groups.sort_by_key(|g| (g.is_empty(), g.earliest())),
        SortDirection::Descending => groups.sort_by_key(|g| (g.is_empty(), Reverse(g.latest()))),
    }

    groups
}

/// SHAs of `records` ordered oldest first, whatever order they come in
#[must_use]
pub fn replay_order<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let mut records: Vec<&CommitRecord> = records.into_iter().collect();
    sort_by_date(&mut records, SortDirection::Ascending);
    records.into_iter().map(|r| r.sha.as_str()).collect()
}

/// Command prefix used to render replay instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayCommand {
    prefix: String,
}

impl Default for ReplayCommand {
    fn default() -> Self {
        Self::new("git cherry-pick")
    }
}

impl ReplayCommand {
    /// Use `prefix` verbatim
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `git cherry-pick`, extra arguments, then `-m 1` when merge commits
    /// may be part of the replay
    #[must_use]
    pub fn cherry_pick(arguments: Option<&str>, include_merge_commits: bool) -> Self {
        let mut parts = vec!["git cherry-pick"];
        if let Some(arguments) = arguments.map(str::trim).filter(|a| !a.is_empty()) {
            parts.push(arguments);
        }
        if include_merge_commits {
            parts.push("-m 1");
        }
        Self::new(parts.join(" "))
    }

    /// The command prefix
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The command for a single commit
    #[must_use]
    pub fn for_sha(&self, sha: &str) -> String {
        format!("{} {}", self.prefix, sha)
    }

    /// The command replaying `records` oldest first
    #[must_use]
    pub fn render<'a, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'a CommitRecord>,
    {
        format!("{} {}", self.prefix, replay_order(records).join(" "))
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: replay order is chronological for any input order
        #[test]
        fn prop_replay_is_chronological(
            stamps in proptest::collection::vec(0i64..2_000_000_000i64, 0..20),
        ) {
            let records: Vec<CommitRecord> = stamps
                .iter()
                .enumerate()
                .map(|(i, ts)| CommitRecord {
                    message: String::new(),
                    author: String::new(),
                    date: DateTime::from_timestamp(*ts, 0).unwrap_or_default().fixed_offset(),
                    sha: format!("{i:010}"),
                    commit_url: String::new(),
                    pr_url: String::new(),
                    item_number: "1".to_string(),
                    is_merge: false,
                })
                .collect();

            let replay = replay_order(records.iter().rev());
            let dates: Vec<_> = replay
                .iter()
                .map(|sha| records.iter().find(|r| r.sha == *sha).map(|r| r.date))
                .collect();
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(replay.len(), records.len());
        }
    }
}
