// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Deduplicating commit store
//!
//! Holds at most one [`CommitRecord`] per (possibly shortened) SHA and keeps
//! an index from tracked item to record positions. When the same commit is
//! seen again, the record keeps the lowest-numbered pull request it was seen
//! in.
//!
//! With short hashes enabled, two different commits sharing the short prefix
//! are treated as the same record.

use std::collections::HashMap;

use tracing::debug;

use crate::record::CommitRecord;

/// Parse the pull request number at the end of a pull request URL
///
/// A `", "`-joined list yields its smallest number. Returns `None` when no
/// entry ends in a numeric path segment.
#[must_use]
pub fn pull_request_number(pr_url: &str) -> Option<u64> {
    pr_url
        .split(", ")
        .filter_map(|url| {
            url.trim()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .and_then(|segment| segment.parse::<u64>().ok())
        })
        .min()
}

/// What [`CommitStore::save`] did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New record appended at this position
    Inserted(usize),
    /// Merge commit dropped because merge commits are ignored
    SkippedMerge,
    /// Known commit; its pull request URL was replaced
    Updated(usize),
    /// Known commit; nothing changed
    Unchanged(usize),
}

/// Append-only, deduplicating collection of commit records
#[derive(Debug, Clone, Default)]
pub struct CommitStore {
    records: Vec<CommitRecord>,
    positions_by_sha: HashMap<String, usize>,
    index: HashMap<String, Vec<usize>>,
    ignore_merge_commits: bool,
}

impl CommitStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop merge commits instead of storing them
    #[must_use]
    pub fn ignoring_merge_commits(mut self, ignore: bool) -> Self {
        self.ignore_merge_commits = ignore;
        self
    }

    /// Save a record, merging it into an existing one with the same SHA
    pub fn save(&mut self, record: CommitRecord) -> SaveOutcome {
        if let Some(&position) = self.positions_by_sha.get(&record.sha) {
            return self.merge_sighting(position, &record.pr_url);
        }

        if self.ignore_merge_commits && record.is_merge {
            debug!(sha = %record.sha, "Skipping merge commit");
            return SaveOutcome::SkippedMerge;
        }

        let position = self.records.len();
        self.positions_by_sha.insert(record.sha.clone(), position);
        self.index
            .entry(record.item_number.clone())
            .or_default()
            .push(position);
        debug!(sha = %record.sha, item = %record.item_number, position, "Stored commit");
        self.records.push(record);

        SaveOutcome::Inserted(position)
    }

    fn merge_sighting(&mut self, position: usize, incoming: &str) -> SaveOutcome {
        let stored = &mut self.records[position];

        let Some(incoming_number) = pull_request_number(incoming) else {
            return SaveOutcome::Unchanged(position);
        };

        let replace = match pull_request_number(&stored.pr_url) {
            Some(stored_number) => incoming_number < stored_number,
            None => !stored.has_pull_request(),
        };

        if replace {
            debug!(
                sha = %stored.sha,
                from = %stored.pr_url,
                to = %incoming,
                "Keeping earlier pull request"
            );
            stored.pr_url = incoming.to_string();
            SaveOutcome::Updated(position)
        } else {
            SaveOutcome::Unchanged(position)
        }
    }

    /// All records in insertion order
    #[must_use]
    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    /// Look up a record by its stored SHA
    #[must_use]
    pub fn get(&self, sha: &str) -> Option<&CommitRecord> {
        self.positions_by_sha.get(sha).map(|&p| &self.records[p])
    }

    /// Record positions for a tracked item, in insertion order
    #[must_use]
    pub fn positions(&self, item: &str) -> Option<&[usize]> {
        self.index.get(item).map(Vec::as_slice)
    }

    /// Records for a tracked item, in insertion order
    #[must_use]
    pub fn records_for(&self, item: &str) -> Vec<&CommitRecord> {
        self.positions(item)
            .unwrap_or_default()
            .iter()
            .map(|&p| &self.records[p])
            .collect()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::record::NO_PULL_REQUEST;
    use chrono::DateTime;
    use proptest::prelude::*;

    fn sighting(number: Option<u32>) -> CommitRecord {
        CommitRecord {
            message: "ITEM-1 change".to_string(),
            author: "Uni <uni@example.com>".to_string(),
            date: DateTime::parse_from_rfc3339("2024-01-12T08:30:02Z").unwrap(),
            sha: "abcdef1234".to_string(),
            commit_url: "https://github.com/acme/app/commit/abcdef1234".to_string(),
            pr_url: number.map_or_else(
                || NO_PULL_REQUEST.to_string(),
                |n| format!("https://github.com/acme/app/pull/{n}"),
            ),
            item_number: "1".to_string(),
            is_merge: false,
        }
    }

    proptest! {
        /// Property: the stored pull request is the minimum over all sightings,
        /// whatever the arrival order
        #[test]
        fn prop_merge_is_order_independent(
            numbers in proptest::collection::vec(proptest::option::of(1u32..10_000), 1..12),
        ) {
            let mut forward = CommitStore::new();
            for n in &numbers {
                forward.save(sighting(*n));
            }
            let mut backward = CommitStore::new();
            for n in numbers.iter().rev() {
                backward.save(sighting(*n));
            }

            prop_assert_eq!(forward.len(), 1);
            prop_assert_eq!(&forward.records()[0].pr_url, &backward.records()[0].pr_url);

            let expected = numbers.iter().flatten().min().copied();
            prop_assert_eq!(pull_request_number(&forward.records()[0].pr_url), expected.map(u64::from));
        }
    }
}
