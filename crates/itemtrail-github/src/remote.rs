// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Read-only queries against a remote repository service
//!
//! [`RemoteQuery`] is the only thing the collection engine knows about the
//! remote side. [`crate::GitHubClient`] implements it over the GitHub REST
//! API; tests implement it in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itemtrail_core::RawCommit;
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;

/// A branch and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name
    pub name: String,
    /// SHA of the latest commit on the branch
    pub head_sha: String,
}

/// A pull request a commit belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLink {
    /// Pull request number
    pub number: u64,
    /// Web URL of the pull request
    pub html_url: String,
}

/// A closed pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Name of the source branch
    pub head_ref: String,
    /// True if the pull request was merged rather than just closed
    pub merged: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Web URL of the pull request
    pub html_url: String,
}

/// Read-only query interface over a remote repository
#[async_trait]
pub trait RemoteQuery: Send + Sync {
    /// Look up a branch
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::BranchNotFound` if the branch does not exist.
    async fn get_branch(&self, name: &str) -> Result<BranchInfo, RemoteError>;

    /// History reachable from `head_sha`, newest first, optionally only
    /// commits made at or after `since`
    async fn commit_history(
        &self,
        head_sha: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawCommit>, RemoteError>;

    /// Pull requests that contain the commit
    async fn commit_pull_requests(&self, sha: &str) -> Result<Vec<PullRequestLink>, RemoteError>;

    /// Closed pull requests into `base`, newest first
    ///
    /// Implementations may stop fetching once they reach pull requests created
    /// before `created_since`; callers must still check creation dates.
    async fn closed_pull_requests(
        &self,
        base: &str,
        created_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PullRequest>, RemoteError>;

    /// Commits of a pull request
    async fn pull_request_commits(&self, number: u64) -> Result<Vec<RawCommit>, RemoteError>;
}
