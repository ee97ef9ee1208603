// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test fixtures for itemtrail integration tests
//!
//! [`FakeRemote`] is an in-memory [`RemoteQuery`] holding one repository:
//! branches, a linear history, closed pull requests and their commits.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itemtrail::settings::CollectionConfig;
use itemtrail_core::{MatchMode, RawCommit};
use itemtrail_github::{BranchInfo, PullRequest, PullRequestLink, RemoteError, RemoteQuery};

pub const REPO_URL: &str = "https://github.com/acme/app";

// ============================================================================
// Builders
// ============================================================================

/// Parse an RFC 3339 date
pub fn date(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid RFC 3339 date")
        .with_timezone(&Utc)
}

/// A commit with one parent, authored at `at`
pub fn commit(sha: &str, message: &str, at: &str) -> RawCommit {
    RawCommit {
        sha: sha.to_string(),
        message: message.to_string(),
        author_name: "Uni".to_string(),
        author_email: "uni@example.com".to_string(),
        authored_at: DateTime::parse_from_rfc3339(at).expect("valid RFC 3339 date"),
        html_url: format!("{REPO_URL}/commit/{sha}"),
        parent_count: 1,
    }
}

/// A merge commit authored at `at`
pub fn merge_commit(sha: &str, message: &str, at: &str) -> RawCommit {
    RawCommit {
        parent_count: 2,
        ..commit(sha, message, at)
    }
}

/// Web URL of pull request `number`
pub fn pr_url(number: u64) -> String {
    format!("{REPO_URL}/pull/{number}")
}

/// A closed pull request
pub fn pull(number: u64, head_ref: &str, merged: bool, created_at: &str) -> PullRequest {
    PullRequest {
        number,
        head_ref: head_ref.to_string(),
        merged,
        created_at: date(created_at),
        html_url: pr_url(number),
    }
}

/// Collection over both phases for `items`, matched strictly
pub fn collection_config(items: &[&str]) -> CollectionConfig {
    CollectionConfig {
        items: items.iter().map(ToString::to_string).collect(),
        match_mode: MatchMode::Strict,
        use_commit_history: true,
        use_pull_requests: true,
        ..Default::default()
    }
}

// ============================================================================
// In-memory remote
// ============================================================================

/// In-memory repository service
#[derive(Debug, Default)]
pub struct FakeRemote {
    /// Branch name to head SHA
    pub branches: HashMap<String, String>,
    /// Branch history, newest first
    pub history: Vec<RawCommit>,
    /// Pull requests each commit belongs to
    pub commit_pulls: HashMap<String, Vec<u64>>,
    /// Closed pull requests, newest first
    pub closed_pulls: Vec<PullRequest>,
    /// Commits of each pull request
    pub pull_commits: HashMap<u64, Vec<RawCommit>>,
    /// Pull request whose commit listing fails with a server error
    pub failing_pull: Option<u64>,
    /// Requests served, in order
    pub requests: Mutex<Vec<String>>,
}

impl FakeRemote {
    /// Repository with a `main` branch
    pub fn new() -> Self {
        let mut remote = Self::default();
        remote.branches.insert("main".into(), "head".into());
        remote
    }

    /// Append a history commit belonging to `pulls`
    pub fn with_history(mut self, commit: RawCommit, pulls: &[u64]) -> Self {
        if !pulls.is_empty() {
            self.commit_pulls.insert(commit.sha.clone(), pulls.to_vec());
        }
        self.history.push(commit);
        self
    }

    /// Append a closed pull request with its commits
    pub fn with_pull(mut self, pull: PullRequest, commits: Vec<RawCommit>) -> Self {
        self.pull_commits.insert(pull.number, commits);
        self.closed_pulls.push(pull);
        self
    }

    /// Make listing the commits of `number` fail
    pub fn failing_on_pull(mut self, number: u64) -> Self {
        self.failing_pull = Some(number);
        self
    }

    /// Requests served so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().expect("request log").push(request);
    }
}

#[async_trait]
impl RemoteQuery for FakeRemote {
    async fn get_branch(&self, name: &str) -> Result<BranchInfo, RemoteError> {
        self.record(format!("branch {name}"));
        self.branches
            .get(name)
            .map(|head| BranchInfo {
                name: name.to_string(),
                head_sha: head.clone(),
            })
            .ok_or_else(|| RemoteError::BranchNotFound {
                name: name.to_string(),
            })
    }

    async fn commit_history(
        &self,
        head_sha: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawCommit>, RemoteError> {
        self.record(format!("history {head_sha}"));
        Ok(self
            .history
            .iter()
            .filter(|c| since.is_none_or(|limit| c.authored_at >= limit))
            .cloned()
            .collect())
    }

    async fn commit_pull_requests(&self, sha: &str) -> Result<Vec<PullRequestLink>, RemoteError> {
        self.record(format!("commit pulls {sha}"));
        Ok(self
            .commit_pulls
            .get(sha)
            .into_iter()
            .flatten()
            .map(|&number| PullRequestLink {
                number,
                html_url: pr_url(number),
            })
            .collect())
    }

    async fn closed_pull_requests(
        &self,
        base: &str,
        _created_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PullRequest>, RemoteError> {
        self.record(format!("closed pulls {base}"));
        Ok(self.closed_pulls.clone())
    }

    async fn pull_request_commits(&self, number: u64) -> Result<Vec<RawCommit>, RemoteError> {
        self.record(format!("pull commits {number}"));
        if self.failing_pull == Some(number) {
            return Err(RemoteError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }
        Ok(self.pull_commits.get(&number).cloned().unwrap_or_default())
    }
}
