// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Output formatters and record sinks
//!
//! A [`Report`] fixes the display order, grouping and replay instructions
//! once; every [`RecordSink`] renders the same report:
//!
//! - [`text`]: plain text on the terminal and in `output.txt`
//! - [`spreadsheet`]: `output.xlsx`
//! - [`list`]: a flat entry list for interactive front ends, or JSON

pub mod list;
pub mod spreadsheet;
pub mod text;

use chrono::{DateTime, FixedOffset};
use itemtrail_core::{CommitRecord, ReplayCommand, SortDirection};

use crate::collect::{CollectedCommits, RunOutcome};
use crate::settings::{CommitDetails, OutputConfig};

pub use list::{JsonListSink, ListEntry, entries};
pub use spreadsheet::SpreadsheetSink;
pub use text::{TerminalSink, TextFileSink};

/// Message every sink renders for a run without commits
pub const NO_COMMITS: &str = "No commits found";

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Writing a file or stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building or saving the spreadsheet failed
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Serializing the entry list failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Commits of one item, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    /// Tracked item
    pub item: String,
    /// Commits sorted in the display direction
    pub commits: Vec<CommitRecord>,
    /// Replay instruction for this group, oldest first
    pub replay: Option<String>,
}

/// Flat or grouped commit layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// All commits sorted by date
    Flat(Vec<CommitRecord>),
    /// One group per tracked item
    Grouped(Vec<ReportGroup>),
}

/// Everything a sink needs to render a run
#[derive(Debug, Clone)]
pub struct Report {
    /// Number of commits found
    pub found: usize,
    /// Commit layout
    pub layout: Layout,
    /// Replay instruction for the whole run, oldest first
    pub replay: Option<String>,
    /// Display direction
    pub direction: SortDirection,
    /// Visible commit fields
    pub details: CommitDetails,
    /// Command prefix for per-commit replay lines
    pub replay_command: ReplayCommand,
    /// Items are labelled "Item Number" rather than "Item"
    pub numeric_items: bool,
    /// Hashes are truncated
    pub short_sha: bool,
}

impl Report {
    /// Report for the outcome of a run
    #[must_use]
    pub fn from_outcome(outcome: &RunOutcome, config: &OutputConfig) -> Self {
        match outcome {
            RunOutcome::Commits(collected) => Self::build(collected, config),
            RunOutcome::NoCommits { .. } => Self::empty(config),
        }
    }

    /// Report over collected commits
    #[must_use]
    pub fn build(collected: &CollectedCommits, config: &OutputConfig) -> Self {
        let direction = config.direction;
        let layout = if config.group_by_item {
            Layout::Grouped(
                collected
                    .grouped(direction)
                    .into_iter()
                    .map(|group| ReportGroup {
                        item: group.item.to_string(),
                        replay: (config.item_replay && !group.is_empty())
                            .then(|| config.replay.render(group.commits.iter().copied())),
                        commits: group.commits.into_iter().cloned().collect(),
                    })
                    .collect(),
            )
        } else {
            Layout::Flat(collected.flat(direction).into_iter().cloned().collect())
        };

        Self {
            found: collected.len(),
            layout,
            replay: config.run_replay.then(|| collected.replay(&config.replay)),
            ..Self::empty(config)
        }
    }

    /// Report for a run that found nothing
    #[must_use]
    pub fn empty(config: &OutputConfig) -> Self {
        Self {
            found: 0,
            layout: Layout::Flat(Vec::new()),
            replay: None,
            direction: config.direction,
            details: config.details,
            replay_command: config.replay.clone(),
            numeric_items: config.numeric_items,
            short_sha: config.short_sha,
        }
    }

    /// True if no commits were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    /// Commits in display order, groups concatenated
    #[must_use]
    pub fn rows(&self) -> Vec<&CommitRecord> {
        match &self.layout {
            Layout::Flat(commits) => commits.iter().collect(),
            Layout::Grouped(groups) => groups.iter().flat_map(|g| g.commits.iter()).collect(),
        }
    }

    /// Label for item numbers
    #[must_use]
    pub fn item_label(&self) -> &'static str {
        if self.numeric_items { "Item Number" } else { "Item" }
    }

    /// Visible labelled fields of `record`, message excluded
    #[must_use]
    pub fn detail_lines(&self, record: &CommitRecord) -> Vec<(&'static str, String)> {
        let d = &self.details;
        let mut lines = Vec::new();
        if d.item_number {
            lines.push((self.item_label(), record.item_number.clone()));
        }
        if d.author {
            lines.push(("Author", record.author.clone()));
        }
        if d.date {
            lines.push(("Date", format_date(&record.date)));
        }
        if d.commit_url {
            lines.push(("Commit URL", record.commit_url.clone()));
        }
        if d.pull_request_url {
            lines.push(("Pull Request URL", record.pr_url.clone()));
        }
        if d.sha {
            lines.push(("SHA", record.sha.clone()));
        }
        if d.is_merge_commit {
            lines.push(("Is Merge Commit", format_flag(record.is_merge)));
        }
        if d.cherry_pick_command {
            lines.push(("Cherry-Pick Command", self.replay_command.for_sha(&record.sha)));
        }
        lines
    }
}

/// Commit date as shown in reports, keeping the original offset
#[must_use]
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

fn format_flag(flag: bool) -> String {
    String::from(if flag { "True" } else { "False" })
}

/// A destination for reports
pub trait RecordSink {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Render `report`
    ///
    /// # Errors
    ///
    /// Returns an [`OutputError`] if the destination cannot be written.
    fn write(&mut self, report: &Report) -> Result<(), OutputError>;
}

/// The file and terminal sinks enabled in `config`
#[must_use]
pub fn configured_sinks(config: &OutputConfig) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();
    if config.to_terminal {
        sinks.push(Box::new(TerminalSink::stdout()));
    }
    if config.to_text_file {
        sinks.push(Box::new(TextFileSink::in_dir(&config.output_dir)));
    }
    if config.to_spreadsheet {
        sinks.push(Box::new(SpreadsheetSink::in_dir(&config.output_dir)));
    }
    sinks
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::DateTime;
    use itemtrail_core::{CommitRecord, CommitStore, NO_PULL_REQUEST};

    use crate::collect::CollectedCommits;

    pub fn record(sha: &str, item: &str, date: &str, pr_url: &str) -> CommitRecord {
        CommitRecord {
            message: format!("ITEM-{item} change {sha}"),
            author: "Uni <uni@example.com>".to_string(),
            date: DateTime::parse_from_rfc3339(date).expect("valid date"),
            sha: sha.to_string(),
            commit_url: format!("https://github.com/acme/app/commit/{sha}"),
            pr_url: pr_url.to_string(),
            item_number: item.to_string(),
            is_merge: false,
        }
    }

    /// Items 1, 2 and 3; item 3 has no commits
    pub fn collected() -> CollectedCommits {
        let mut store = CommitStore::new();
        store.save(record("aaa", "1", "2024-01-02T00:00:00+00:00", NO_PULL_REQUEST));
        store.save(record(
            "bbb",
            "2",
            "2024-01-01T00:00:00+00:00",
            "https://github.com/acme/app/pull/4",
        ));
        store.save(record("ccc", "1", "2024-01-03T00:00:00+00:00", NO_PULL_REQUEST));
        CollectedCommits::new(store, vec!["1".into(), "2".into(), "3".into()])
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::collected;
    use super::*;
    use similar_asserts::assert_eq;

    fn shas(report: &Report) -> Vec<&str> {
        report.rows().iter().map(|r| r.sha.as_str()).collect()
    }

    #[test]
    fn test_flat_report() {
        let config = OutputConfig {
            direction: SortDirection::Descending,
            run_replay: true,
            ..Default::default()
        };
        let report = Report::build(&collected(), &config);

        assert_eq!(report.found, 3);
        assert_eq!(shas(&report), ["ccc", "aaa", "bbb"]);
        assert_eq!(report.replay.as_deref(), Some("git cherry-pick bbb aaa ccc"));
    }

    #[test]
    fn test_grouped_report_with_item_replay() {
        let config = OutputConfig {
            group_by_item: true,
            item_replay: true,
            ..Default::default()
        };
        let report = Report::build(&collected(), &config);

        let Layout::Grouped(groups) = &report.layout else {
            panic!("expected grouped layout");
        };
        let items: Vec<&str> = groups.iter().map(|g| g.item.as_str()).collect();
        assert_eq!(items, ["2", "1", "3"]);
        assert_eq!(groups[1].replay.as_deref(), Some("git cherry-pick aaa ccc"));
        assert_eq!(groups[2].replay, None, "empty groups get no replay line");
        assert_eq!(report.replay, None);
        assert_eq!(shas(&report), ["bbb", "aaa", "ccc"]);
    }

    #[test]
    fn test_empty_report() {
        let outcome = RunOutcome::NoCommits { items: vec!["1".into()] };
        let report = Report::from_outcome(&outcome, &OutputConfig::default());
        assert!(report.is_empty());
        assert!(report.rows().is_empty());
    }

    #[test]
    fn test_detail_lines_follow_visibility() {
        let config = OutputConfig {
            details: CommitDetails {
                message: false,
                item_number: true,
                author: false,
                date: true,
                commit_url: false,
                pull_request_url: false,
                sha: true,
                is_merge_commit: true,
                cherry_pick_command: true,
            },
            numeric_items: true,
            ..Default::default()
        };
        let report = Report::build(&collected(), &config);
        let record = report.rows()[0];

        assert_eq!(
            report.detail_lines(record),
            vec![
                ("Item Number", "2".to_string()),
                ("Date", "2024-01-01 00:00:00+00:00".to_string()),
                ("SHA", "bbb".to_string()),
                ("Is Merge Commit", "False".to_string()),
                ("Cherry-Pick Command", "git cherry-pick bbb".to_string()),
            ]
        );
    }

    #[test]
    fn test_format_date_keeps_offset() {
        let date = DateTime::parse_from_rfc3339("2024-01-15T10:02:11+01:00").expect("valid date");
        assert_eq!(format_date(&date), "2024-01-15 10:02:11+01:00");
    }
}
