// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Spreadsheet reports

use std::path::{Path, PathBuf};

use itemtrail_core::CommitRecord;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::{NO_COMMITS, OutputError, RecordSink, Report, format_date, format_flag};

/// File name of the spreadsheet report
pub const SPREADSHEET_FILE_NAME: &str = "output.xlsx";

/// A spreadsheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Commit message
    Message,
    /// Matched item
    ItemNumber,
    /// Author
    Author,
    /// Author date
    Date,
    /// Commit web URL
    CommitUrl,
    /// Pull request URL(s)
    PullRequestUrl,
    /// Commit hash
    Sha,
    /// Merge commit flag
    IsMergeCommit,
}

impl Column {
    /// Header text; the item column is headed `item_label`
    #[must_use]
    pub fn header(self, item_label: &'static str) -> &'static str {
        match self {
            Self::Message => "Commit Message",
            Self::ItemNumber => item_label,
            Self::Author => "Author",
            Self::Date => "Date",
            Self::CommitUrl => "Commit Url",
            Self::PullRequestUrl => "Pull Request Url",
            Self::Sha => "Sha",
            Self::IsMergeCommit => "Is Merge Commit",
        }
    }

    /// Column width in characters
    #[must_use]
    pub fn width(self, short_sha: bool) -> f64 {
        match self {
            Self::Message => 100.0,
            Self::ItemNumber => 15.0,
            Self::Author => 45.0,
            Self::Date => 20.0,
            Self::CommitUrl => 101.0,
            Self::PullRequestUrl => 61.0,
            Self::Sha if short_sha => 10.0,
            Self::Sha | Self::IsMergeCommit => 42.0,
        }
    }

    fn centered(self) -> bool {
        matches!(
            self,
            Self::ItemNumber | Self::Date | Self::Sha | Self::IsMergeCommit
        )
    }

    fn value(self, record: &CommitRecord) -> String {
        match self {
            Self::Message => record.message.clone(),
            Self::ItemNumber => record.item_number.clone(),
            Self::Author => record.author.clone(),
            Self::Date => format_date(&record.date),
            Self::CommitUrl => record.commit_url.clone(),
            Self::PullRequestUrl => record.pr_url.clone(),
            Self::Sha => record.sha.clone(),
            Self::IsMergeCommit => format_flag(record.is_merge),
        }
    }
}

/// Columns shown for `report`, left to right
#[must_use]
pub fn visible_columns(report: &Report) -> Vec<Column> {
    let d = &report.details;
    [
        (d.message, Column::Message),
        (d.item_number, Column::ItemNumber),
        (d.author, Column::Author),
        (d.date, Column::Date),
        (d.commit_url, Column::CommitUrl),
        (d.pull_request_url, Column::PullRequestUrl),
        (d.sha, Column::Sha),
        (d.is_merge_commit, Column::IsMergeCommit),
    ]
    .into_iter()
    .filter_map(|(shown, column)| shown.then_some(column))
    .collect()
}

/// Header row for `report`, left to right
#[must_use]
pub fn headers(report: &Report) -> Vec<&'static str> {
    visible_columns(report)
        .into_iter()
        .map(|column| column.header(report.item_label()))
        .collect()
}

struct Formats {
    header: Format,
    data: Format,
    centered: Format,
}

impl Formats {
    fn new() -> Self {
        let cell = |align: FormatAlign, border: u32| {
            Format::new()
                .set_background_color(Color::White)
                .set_align(align)
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(border))
        };
        Self {
            header: Format::new()
                .set_background_color(Color::RGB(0xB8CCE4))
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::Black),
            data: cell(FormatAlign::Left, 0xD9D9D9),
            centered: cell(FormatAlign::Center, 0xD0D0D0),
        }
    }
}

/// Fill `sheet` with `report`
///
/// # Errors
///
/// Returns any error raised by the worksheet writer.
pub fn fill_worksheet(sheet: &mut Worksheet, report: &Report) -> Result<(), XlsxError> {
    let formats = Formats::new();
    if report.is_empty() {
        sheet.write_string_with_format(0, 0, NO_COMMITS, &formats.data)?;
        return Ok(());
    }

    let columns = visible_columns(report);
    for ((col, column), header) in (0u16..).zip(&columns).zip(headers(report)) {
        sheet.set_column_width(col, column.width(report.short_sha))?;
        sheet.write_string_with_format(0, col, header, &formats.header)?;
    }

    let rows = report.rows();
    for (row, record) in (1u32..).zip(&rows) {
        for (col, column) in (0u16..).zip(&columns) {
            let format = if column.centered() {
                &formats.centered
            } else {
                &formats.data
            };
            sheet.write_string_with_format(row, col, column.value(record), format)?;
        }
    }

    if let Some(replay) = &report.replay {
        // One blank row between the data and the replay instruction
        let row = u32::try_from(rows.len()).unwrap_or(u32::MAX - 2) + 2;
        let last_col = u16::try_from(columns.len().saturating_sub(1)).unwrap_or(0);
        if last_col == 0 {
            sheet.write_string_with_format(row, 0, replay, &formats.data)?;
        } else {
            sheet.merge_range(row, 0, row, last_col, replay, &formats.data)?;
        }
    }
    Ok(())
}

/// Writes the report to an `.xlsx` file, replacing it
#[derive(Debug, Clone)]
pub struct SpreadsheetSink {
    path: PathBuf,
}

impl SpreadsheetSink {
    /// Sink writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink writing `output.xlsx` in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SPREADSHEET_FILE_NAME))
    }

    /// Target path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for SpreadsheetSink {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn write(&mut self, report: &Report) -> Result<(), OutputError> {
        let mut workbook = Workbook::new();
        fill_worksheet(workbook.add_worksheet(), report)?;
        workbook.save(&self.path)?;
        info!(path = %self.path.display(), rows = report.found, "Wrote spreadsheet report");
        Ok(())
    }
}
