// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit records and the builder that normalizes remote commits into them

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Placeholder stored in [`CommitRecord::pr_url`] when no pull request is known
pub const NO_PULL_REQUEST: &str = "None";

/// Default length of a shortened commit hash
pub const DEFAULT_SHORT_SHA_LENGTH: usize = 10;

/// A commit as delivered by the remote repository service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Full commit SHA
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author date, with the author's timezone
    pub authored_at: DateTime<FixedOffset>,
    /// Web URL of the commit
    pub html_url: String,
    /// Number of parent commits
    pub parent_count: usize,
}

impl RawCommit {
    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// Pull request context a commit was discovered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequests {
    /// Discovered by scanning one pull request
    Single(String),
    /// Discovered in branch history; every pull request the commit belongs to
    Many(Vec<String>),
}

impl PullRequests {
    /// Render the pull request field of a [`CommitRecord`]
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Self::Single(url) => url.clone(),
            Self::Many(urls) if urls.is_empty() => NO_PULL_REQUEST.to_string(),
            Self::Many(urls) => urls.join(", "),
        }
    }
}

/// The canonical, normalized unit of output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit message
    pub message: String,
    /// Author as `Name <email>`
    pub author: String,
    /// Author date
    pub date: DateTime<FixedOffset>,
    /// Commit SHA, possibly shortened
    pub sha: String,
    /// Web URL of the commit
    pub commit_url: String,
    /// Pull request URL(s), or [`NO_PULL_REQUEST`]
    pub pr_url: String,
    /// Tracked item this commit was matched to
    pub item_number: String,
    /// True if the commit has more than one parent
    pub is_merge: bool,
}

impl CommitRecord {
    /// True unless the pull request field is empty or the placeholder
    #[must_use]
    pub fn has_pull_request(&self) -> bool {
        !self.pr_url.is_empty() && self.pr_url != NO_PULL_REQUEST
    }
}

/// Converts [`RawCommit`]s into [`CommitRecord`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordBuilder {
    short_sha_length: Option<usize>,
}

impl RecordBuilder {
    /// Builder that keeps full hashes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate hashes to `length` characters
    #[must_use]
    pub fn with_short_sha(mut self, length: usize) -> Self {
        self.short_sha_length = Some(length);
        self
    }

    /// Configured short hash length, if short hashes are enabled
    #[must_use]
    pub fn short_sha_length(&self) -> Option<usize> {
        self.short_sha_length
    }

    /// The hash a record for `sha` is stored under
    #[must_use]
    pub fn effective_sha<'a>(&self, sha: &'a str) -> &'a str {
        match self.short_sha_length {
            Some(length) => sha.get(..length).unwrap_or(sha),
            None => sha,
        }
    }

    /// Build the record for `commit` matched against `item_number`
    #[must_use]
    pub fn build(
        &self,
        commit: &RawCommit,
        item_number: &str,
        pull_requests: &PullRequests,
    ) -> CommitRecord {
        CommitRecord {
            message: commit.message.clone(),
            author: format!("{} <{}>", commit.author_name, commit.author_email),
            date: commit.authored_at,
            sha: self.effective_sha(&commit.sha).to_string(),
            commit_url: commit.html_url.clone(),
            pr_url: pull_requests.to_field(),
            item_number: item_number.to_string(),
            is_merge: commit.is_merge(),
        }
    }
}
