// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Settings file loading and validation
//!
//! The settings file is a JSON object with PascalCase keys. [`Settings`] is
//! its raw form; [`RunConfig::from_settings`] validates it, applies the
//! command-line [`Overrides`] and produces the immutable configuration every
//! component of a run receives.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Months, Utc};
use itemtrail_core::{ItemMatcher, MatchMode, RecordBuilder, ReplayCommand, SortDirection};
use itemtrail_core::record::DEFAULT_SHORT_SHA_LENGTH;
use itemtrail_github::ConnectOptions;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file does not have a `.json` extension
    #[error("The file containing your settings must be a '.json' file: {path}")]
    NotJson {
        /// Offending path
        path: PathBuf,
    },

    /// The settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The settings file is not valid settings JSON
    #[error("Your {path} file has an error on line {line}. Please fix it and try again: {source}")]
    Syntax {
        /// Settings file path
        path: PathBuf,
        /// 1-based line of the error
        line: usize,
        /// Parser error
        source: serde_json::Error,
    },

    /// A required setting is absent or blank
    #[error("Missing required setting: {name}")]
    MissingSetting {
        /// Settings key
        name: &'static str,
    },

    /// SearchLimitMonths is negative or out of range
    #[error("SearchLimitMonths must be a positive number of months, got {months}")]
    InvalidSearchLimit {
        /// Configured value
        months: i64,
    },

    /// SecondsBetweenGithubRequests is negative or not a number
    #[error("SecondsBetweenGithubRequests must be zero or more seconds, got {seconds}")]
    InvalidRequestDelay {
        /// Configured value
        seconds: f64,
    },

    /// An entry of ItemNumbers is neither a string nor an integer
    #[error("ItemNumbers entries must be strings or integers, got {value}")]
    InvalidItem {
        /// The offending JSON value
        value: String,
    },
}

/// Which commit fields the formatters show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommitDetails {
    /// Commit message
    #[serde(default)]
    pub message: bool,
    /// Matched item number
    #[serde(default)]
    pub item_number: bool,
    /// Author name and email
    #[serde(default)]
    pub author: bool,
    /// Author date
    #[serde(default)]
    pub date: bool,
    /// Commit web URL
    #[serde(default)]
    pub commit_url: bool,
    /// Pull request URL(s)
    #[serde(default)]
    pub pull_request_url: bool,
    /// Commit hash
    #[serde(default)]
    pub sha: bool,
    /// Merge commit flag
    #[serde(default)]
    pub is_merge_commit: bool,
    /// Per-commit replay command
    #[serde(default)]
    pub cherry_pick_command: bool,
}

impl Default for CommitDetails {
    /// Used when the settings file has no CommitDetailsToShow block
    fn default() -> Self {
        Self {
            message: true,
            item_number: true,
            author: true,
            date: true,
            commit_url: true,
            pull_request_url: true,
            sha: true,
            is_merge_commit: true,
            cherry_pick_command: false,
        }
    }
}

/// Raw settings file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    /// Access token
    #[serde(rename = "GitHubToken")]
    pub github_token: Option<String>,
    /// Repository as `owner/name`
    pub target_repository: Option<String>,
    /// Branch whose history and pull requests are searched
    pub target_branch: Option<String>,
    /// Reduce item numbers to their digits and match numeric tokens
    pub strip_characters_from_item_numbers: bool,
    /// Tracked items, as strings or integers
    pub item_numbers: Vec<serde_json::Value>,
    /// Visible commit fields
    #[serde(rename = "CommitDetailsToShow")]
    pub commit_details: CommitDetails,
    /// Group output by item
    pub group_commits_by_item: bool,
    /// Show a replay command per item group
    pub item_cherry_pick: bool,
    /// Newest commits first
    pub show_commits_in_date_descending_order: bool,
    /// Scan the branch history
    pub use_commit_history: bool,
    /// Scan closed pull requests into the branch
    pub use_pull_requests: bool,
    /// Print the report on stdout
    pub output_to_terminal: bool,
    /// Write output.txt
    pub output_to_txt_file: bool,
    /// Write output.xlsx
    pub output_to_excel_file: bool,
    /// Show the replay command for every commit of the run
    #[serde(alias = "ShowCherryPickCommand")]
    pub all_commits_cherry_pick_command: bool,
    /// Leave commits with more than one parent out
    pub ignore_merge_commits: bool,
    /// Truncate hashes
    pub use_short_commit_hash: bool,
    /// Extra `git cherry-pick` arguments
    pub git_cherry_pick_arguments: Option<String>,
    /// Only look this many months back
    pub search_limit_months: Option<i64>,
    /// Fetch commits and pull requests concurrently
    pub use_concurrent_commit_fetching: bool,
    /// Fixed delay before every GitHub request
    pub seconds_between_github_requests: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            target_repository: None,
            target_branch: None,
            strip_characters_from_item_numbers: true,
            item_numbers: Vec::new(),
            commit_details: CommitDetails::default(),
            group_commits_by_item: false,
            item_cherry_pick: false,
            show_commits_in_date_descending_order: false,
            use_commit_history: false,
            use_pull_requests: false,
            output_to_terminal: false,
            output_to_txt_file: false,
            output_to_excel_file: false,
            all_commits_cherry_pick_command: false,
            ignore_merge_commits: false,
            use_short_commit_hash: false,
            git_cherry_pick_arguments: None,
            search_limit_months: None,
            use_concurrent_commit_fetching: false,
            seconds_between_github_requests: None,
        }
    }
}

impl Settings {
    /// Load a settings file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotJson` for paths without a `.json` extension,
    /// `ConfigError::Read` when the file cannot be read and
    /// `ConfigError::Syntax` with the offending line when it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(ConfigError::NotJson {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Syntax {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        })
    }

    /// ItemNumbers as strings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidItem` for entries that are neither
    /// strings nor integers.
    pub fn item_strings(&self) -> Result<Vec<String>, ConfigError> {
        self.item_numbers
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => Ok(s.clone()),
                serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
                other => Err(ConfigError::InvalidItem {
                    value: other.to_string(),
                }),
            })
            .collect()
    }
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces GitHubToken
    pub token: Option<String>,
    /// Replaces ItemNumbers when non-empty
    pub items: Vec<String>,
    /// Directory for output files
    pub output_dir: Option<PathBuf>,
}

/// Remote connection settings
#[derive(Clone)]
pub struct RemoteConfig {
    /// Access token
    pub token: String,
    /// Repository as `owner/name`
    pub repository: String,
    /// Target branch
    pub branch: String,
    /// Fixed delay before every request
    pub request_delay: Option<Duration>,
}

impl RemoteConfig {
    /// Options for [`itemtrail_github::GitHubClient::connect`]
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions::new(self.token.clone(), self.repository.clone())
            .with_request_delay(self.request_delay)
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("branch", &self.branch)
            .field("request_delay", &self.request_delay)
            .finish()
    }
}

/// What to collect and how
#[derive(Debug, Clone, Default)]
pub struct CollectionConfig {
    /// Tracked items before normalization
    pub items: Vec<String>,
    /// Matching mode
    pub match_mode: MatchMode,
    /// Run the history phase
    pub use_commit_history: bool,
    /// Run the pull request phase
    pub use_pull_requests: bool,
    /// Fan work out over tasks inside each phase
    pub concurrent: bool,
    /// Search date limit
    pub since: Option<DateTime<Utc>>,
    /// Store truncated hashes
    pub short_sha: bool,
    /// Leave merge commits out of the store
    pub ignore_merge_commits: bool,
}

impl CollectionConfig {
    /// Matcher over the configured items
    #[must_use]
    pub fn matcher(&self) -> ItemMatcher {
        ItemMatcher::new(&self.items, self.match_mode)
    }

    /// Record builder honouring the short hash setting
    #[must_use]
    pub fn record_builder(&self) -> RecordBuilder {
        if self.short_sha {
            RecordBuilder::new().with_short_sha(DEFAULT_SHORT_SHA_LENGTH)
        } else {
            RecordBuilder::new()
        }
    }
}

/// How and where results are rendered
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Visible commit fields
    pub details: CommitDetails,
    /// Group commits by item
    pub group_by_item: bool,
    /// Display direction
    pub direction: SortDirection,
    /// Replay command per item group
    pub item_replay: bool,
    /// Replay command for the whole run
    pub run_replay: bool,
    /// Replay command prefix
    pub replay: ReplayCommand,
    /// Items are labelled "Item Number" rather than "Item"
    pub numeric_items: bool,
    /// Hashes are truncated
    pub short_sha: bool,
    /// Print the report on stdout
    pub to_terminal: bool,
    /// Write output.txt
    pub to_text_file: bool,
    /// Write output.xlsx
    pub to_spreadsheet: bool,
    /// Directory for output files
    pub output_dir: PathBuf,
}

/// Validated, immutable configuration of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Remote connection
    pub remote: RemoteConfig,
    /// Collection
    pub collection: CollectionConfig,
    /// Output
    pub output: OutputConfig,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingSetting { name })
}

/// Inclusive lower date bound `months` calendar months before `now`
///
/// # Errors
///
/// Returns `ConfigError::InvalidSearchLimit` for negative or out-of-range
/// values.
pub fn search_date_limit(
    months: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, ConfigError> {
    match months {
        None | Some(0) => Ok(None),
        Some(m) => u32::try_from(m)
            .ok()
            .and_then(|n| now.checked_sub_months(Months::new(n)))
            .map(Some)
            .ok_or(ConfigError::InvalidSearchLimit { months: m }),
    }
}

fn request_delay(seconds: Option<f64>) -> Result<Option<Duration>, ConfigError> {
    match seconds {
        None => Ok(None),
        Some(s) => Duration::try_from_secs_f64(s)
            .map(|d| Some(d).filter(|d| !d.is_zero()))
            .map_err(|_| ConfigError::InvalidRequestDelay { seconds: s }),
    }
}

impl RunConfig {
    /// Validate `settings`, apply `overrides` and resolve the search date
    /// limit relative to `now`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first setting that is missing or
    /// invalid.
    pub fn from_settings(
        settings: Settings,
        overrides: Overrides,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let items = if overrides.items.is_empty() {
            settings.item_strings()?
        } else {
            overrides.items
        };

        let remote = RemoteConfig {
            token: required(overrides.token.or(settings.github_token), "GitHubToken")?,
            repository: required(settings.target_repository, "TargetRepository")?,
            branch: required(settings.target_branch, "TargetBranch")?,
            request_delay: request_delay(settings.seconds_between_github_requests)?,
        };

        if !settings.use_commit_history && !settings.use_pull_requests {
            warn!("Neither UseCommitHistory nor UsePullRequests is enabled; nothing will be collected");
        }

        let match_mode = if settings.strip_characters_from_item_numbers {
            MatchMode::Strict
        } else {
            MatchMode::Literal
        };

        let collection = CollectionConfig {
            items,
            match_mode,
            use_commit_history: settings.use_commit_history,
            use_pull_requests: settings.use_pull_requests,
            concurrent: settings.use_concurrent_commit_fetching,
            since: search_date_limit(settings.search_limit_months, now)?,
            short_sha: settings.use_short_commit_hash,
            ignore_merge_commits: settings.ignore_merge_commits,
        };

        let output = OutputConfig {
            details: settings.commit_details,
            group_by_item: settings.group_commits_by_item,
            direction: SortDirection::from_descending(settings.show_commits_in_date_descending_order),
            item_replay: settings.item_cherry_pick,
            run_replay: settings.all_commits_cherry_pick_command,
            replay: ReplayCommand::cherry_pick(
                settings.git_cherry_pick_arguments.as_deref(),
                !settings.ignore_merge_commits,
            ),
            numeric_items: settings.strip_characters_from_item_numbers,
            short_sha: settings.use_short_commit_hash,
            to_terminal: settings.output_to_terminal,
            to_text_file: settings.output_to_txt_file,
            to_spreadsheet: settings.output_to_excel_file,
            output_dir: overrides.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(Self {
            remote,
            collection,
            output,
        })
    }
}
