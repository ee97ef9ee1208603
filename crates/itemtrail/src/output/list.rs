// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Entry list for interactive front ends
//!
//! [`entries`] flattens a [`Report`] into the sequence of headers, status
//! lines, commits and replay commands a results pane shows top to bottom.

use std::io::{self, Write};

use itemtrail_core::CommitRecord;
use serde::Serialize;

use super::{Layout, NO_COMMITS, OutputError, RecordSink, Report};

/// One labelled commit field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    /// Field label
    pub label: &'static str,
    /// Rendered value
    pub value: String,
}

/// One row of the results pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListEntry {
    /// Group heading
    Header {
        /// Heading text
        text: String,
    },
    /// Informational line
    Status {
        /// Status text
        text: String,
    },
    /// A commit with its visible fields
    Commit {
        /// Message, when visible
        message: Option<String>,
        /// Remaining visible fields
        details: Vec<DetailLine>,
    },
    /// A copyable replay command
    ReplayCommand {
        /// Label shown before the command
        label: String,
        /// The command
        command: String,
    },
}

fn commit_entry(report: &Report, record: &CommitRecord) -> ListEntry {
    ListEntry::Commit {
        message: report.details.message.then(|| record.message.clone()),
        details: report
            .detail_lines(record)
            .into_iter()
            .map(|(label, value)| DetailLine { label, value })
            .collect(),
    }
}

/// Flatten `report` into display entries
#[must_use]
pub fn entries(report: &Report) -> Vec<ListEntry> {
    if report.is_empty() {
        return vec![ListEntry::Status {
            text: NO_COMMITS.to_string(),
        }];
    }

    let label = report.item_label();
    let mut list = Vec::new();
    match &report.layout {
        Layout::Grouped(groups) => {
            for group in groups {
                if group.commits.is_empty() {
                    let text = if report.numeric_items {
                        format!("No commits found for {label} '{}'", group.item)
                    } else {
                        format!("No commits found for '{}'", group.item)
                    };
                    list.push(ListEntry::Status { text });
                    continue;
                }
                list.push(ListEntry::Header {
                    text: format!("{label}: {}", group.item),
                });
                list.extend(group.commits.iter().map(|r| commit_entry(report, r)));
                if let Some(command) = &group.replay {
                    list.push(ListEntry::ReplayCommand {
                        label: "Item Cherry Pick:".to_string(),
                        command: command.clone(),
                    });
                }
            }
        }
        Layout::Flat(commits) => {
            list.extend(commits.iter().map(|r| commit_entry(report, r)));
        }
    }

    if let Some(command) = &report.replay {
        list.push(ListEntry::ReplayCommand {
            label: "All Commits Cherry Pick:".to_string(),
            command: command.clone(),
        });
    }
    list
}

/// Writes the entry list as pretty-printed JSON
#[derive(Debug)]
pub struct JsonListSink<W> {
    out: W,
}

impl JsonListSink<io::Stdout> {
    /// Sink on the process stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonListSink<W> {
    /// Sink on `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonListSink<W> {
    fn name(&self) -> &'static str {
        "entry list"
    }

    fn write(&mut self, report: &Report) -> Result<(), OutputError> {
        serde_json::to_writer_pretty(&mut self.out, &entries(report))?;
        writeln!(self.out)?;
        Ok(())
    }
}
