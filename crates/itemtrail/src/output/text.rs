// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Plain text reports

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use itemtrail_core::CommitRecord;
use tracing::info;

use super::{Layout, NO_COMMITS, OutputError, RecordSink, Report};

/// File name of the text report
pub const TEXT_FILE_NAME: &str = "output.txt";

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn write_commits(out: &mut String, report: &Report, commits: &[CommitRecord]) {
    for record in commits {
        if report.details.message {
            out.push_str(&format!("\n- {}", record.message));
        }
        for (label, value) in report.detail_lines(record) {
            out.push_str(&format!("\n{label}: {value}"));
        }
        out.push('\n');
    }
}

/// Render `report` as plain text
#[must_use]
pub fn render(report: &Report) -> String {
    if report.is_empty() {
        return NO_COMMITS.to_string();
    }

    let mut out = format!("Found {} related commit{}", report.found, plural(report.found));
    match &report.layout {
        Layout::Grouped(groups) => {
            for group in groups {
                out.push('\n');
                if group.commits.is_empty() {
                    out.push_str(&format!("\nNo commits found for {}\n\n---", group.item));
                    continue;
                }
                let n = group.commits.len();
                out.push_str(&format!("\nCommit{} for {} ({n}):", plural(n), group.item));
                write_commits(&mut out, report, &group.commits);
                if let Some(replay) = &group.replay {
                    out.push_str(&format!("\n{replay}"));
                }
                out.push_str("\n---");
            }
            if let Some(replay) = &report.replay {
                out.push_str(&format!("\n\n{replay}"));
            }
        }
        Layout::Flat(commits) => {
            out.push_str(&format!(
                "\nHere are all commits for your items in {} order:\n",
                report.direction.as_str()
            ));
            write_commits(&mut out, report, commits);
            if let Some(replay) = &report.replay {
                out.push_str(&format!("\n{replay}"));
            }
        }
    }
    out
}

/// Writes text reports to a stream, normally stdout
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    /// Sink on the process stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink on `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TerminalSink<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn write(&mut self, report: &Report) -> Result<(), OutputError> {
        writeln!(self.out, "{}", render(report))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes the text report to a file, replacing it
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    /// Sink writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink writing `output.txt` in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TEXT_FILE_NAME))
    }

    /// Target path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for TextFileSink {
    fn name(&self) -> &'static str {
        "text file"
    }

    fn write(&mut self, report: &Report) -> Result<(), OutputError> {
        std::fs::write(&self.path, render(report))?;
        info!(path = %self.path.display(), "Wrote text report");
        Ok(())
    }
}
