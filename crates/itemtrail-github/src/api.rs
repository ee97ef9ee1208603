// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub REST payloads
//!
//! Only the fields itemtrail reads are modelled; everything else in the
//! responses is ignored.

use chrono::{DateTime, FixedOffset, Utc};
use itemtrail_core::RawCommit;
use serde::Deserialize;

use crate::remote::{BranchInfo, PullRequest, PullRequestLink};

/// `GET /repos/{repo}/branches/{branch}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiBranch {
    /// Branch name
    pub name: String,
    /// Head commit
    pub commit: ApiSha,
}

/// An object carrying only a SHA
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSha {
    /// Commit SHA
    pub sha: String,
}

/// Entry of `GET /repos/{repo}/commits` and `GET /repos/{repo}/pulls/{n}/commits`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommit {
    /// Commit SHA
    pub sha: String,
    /// Web URL
    pub html_url: String,
    /// Git-level commit data
    pub commit: ApiCommitDetail,
    /// Parent commits
    #[serde(default)]
    pub parents: Vec<ApiSha>,
}

/// The `commit` object nested in [`ApiCommit`]
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitDetail {
    /// Commit message
    pub message: String,
    /// Author signature
    pub author: ApiSignature,
}

/// Git author or committer signature
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSignature {
    /// Name
    pub name: String,
    /// Email
    pub email: String,
    /// Timestamp
    pub date: DateTime<FixedOffset>,
}

/// Entry of `GET /repos/{repo}/pulls` and `GET /repos/{repo}/commits/{sha}/pulls`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPullRequest {
    /// Pull request number
    pub number: u64,
    /// Web URL
    pub html_url: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Merge time, absent for pull requests closed without merging
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    /// Source branch
    pub head: ApiRef,
}

/// A branch reference inside a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub name: String,
}

/// Error body returned with unsuccessful responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

impl From<ApiBranch> for BranchInfo {
    fn from(branch: ApiBranch) -> Self {
        Self {
            name: branch.name,
            head_sha: branch.commit.sha,
        }
    }
}

impl From<ApiCommit> for RawCommit {
    fn from(commit: ApiCommit) -> Self {
        Self {
            sha: commit.sha,
            message: commit.commit.message,
            author_name: commit.commit.author.name,
            author_email: commit.commit.author.email,
            authored_at: commit.commit.author.date,
            html_url: commit.html_url,
            parent_count: commit.parents.len(),
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        Self {
            number: pr.number,
            head_ref: pr.head.name,
            merged: pr.merged_at.is_some(),
            created_at: pr.created_at,
            html_url: pr.html_url,
        }
    }
}

impl From<ApiPullRequest> for PullRequestLink {
    fn from(pr: ApiPullRequest) -> Self {
        Self {
            number: pr.number,
            html_url: pr.html_url,
        }
    }
}
