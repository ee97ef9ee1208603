// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub REST implementation of [`RemoteQuery`]

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use itemtrail_core::RawCommit;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::api::{ApiBranch, ApiCommit, ApiErrorBody, ApiPullRequest};
use crate::error::RemoteError;
use crate::remote::{BranchInfo, PullRequest, PullRequestLink, RemoteQuery};

/// Public GitHub API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Items requested per page; GitHub's maximum
pub const PAGE_SIZE: usize = 100;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("itemtrail/", env!("CARGO_PKG_VERSION"));

/// What a request was trying to resolve, used to name 404s
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    Repository(&'a str),
    Branch(&'a str),
    Other,
}

/// Map an unsuccessful response onto the remote error taxonomy
pub(crate) fn classify_status(status: u16, body: &str, target: Target<'_>) -> RemoteError {
    match (status, target) {
        (401, _) => RemoteError::BadCredentials,
        (404, Target::Repository(name)) => RemoteError::RepositoryNotFound {
            name: name.to_string(),
        },
        (404, Target::Branch(name)) => RemoteError::BranchNotFound {
            name: name.to_string(),
        },
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| body.trim().to_string());
            RemoteError::Api { status, message }
        }
    }
}

/// Connection parameters for [`GitHubClient::connect`]
#[derive(Clone)]
pub struct ConnectOptions {
    token: String,
    repository: String,
    api_base: String,
    request_delay: Option<Duration>,
}

impl ConnectOptions {
    /// Options for `repository` (`owner/name`) authenticated with `token`
    pub fn new(token: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            repository: repository.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_delay: None,
        }
    }

    /// Point the client at another API root (GitHub Enterprise, test servers)
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Sleep this long before every request
    #[must_use]
    pub fn with_request_delay(mut self, delay: Option<Duration>) -> Self {
        self.request_delay = delay.filter(|d| !d.is_zero());
        self
    }

    /// Repository name
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("api_base", &self.api_base)
            .field("request_delay", &self.request_delay)
            .finish()
    }
}

/// A connected, repository-scoped GitHub client
pub struct GitHubClient {
    http: reqwest::Client,
    options: ConnectOptions,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Build a client and check that the token can see the repository
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::BadCredentials` when the token is rejected,
    /// `RemoteError::RepositoryNotFound` when the repository does not resolve,
    /// and transport or API errors otherwise.
    pub async fn connect(options: ConnectOptions) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let client = Self { http, options };
        let path = format!("/repos/{}", client.options.repository);
        let _: serde_json::Value = client
            .get_json(&path, &[], Target::Repository(&client.options.repository))
            .await?;

        info!(repository = %client.options.repository, "Connected to GitHub");
        Ok(client)
    }

    /// Repository this client is scoped to
    pub fn repository(&self) -> &str {
        &self.options.repository
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        target: Target<'_>,
    ) -> Result<T, RemoteError> {
        if let Some(delay) = self.options.request_delay {
            tokio::time::sleep(delay).await;
        }

        debug!(path, ?query, "GET");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.options.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &body, target));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch pages until a short page, or until `more` returns false for the
    /// page just fetched
    async fn get_paged<T, F>(
        &self,
        path: &str,
        query: &[(&str, String)],
        mut more: F,
    ) -> Result<Vec<T>, RemoteError>
    where
        T: DeserializeOwned,
        F: FnMut(&[T]) -> bool,
    {
        let mut items = Vec::new();
        for page in 1.. {
            let mut params = query.to_vec();
            params.push(("per_page", PAGE_SIZE.to_string()));
            params.push(("page", page.to_string()));

            let batch: Vec<T> = self.get_json(path, &params, Target::Other).await?;
            let full = batch.len() >= PAGE_SIZE;
            let keep_going = full && more(&batch);
            items.extend(batch);
            if !keep_going {
                break;
            }
        }
        Ok(items)
    }
}

fn api_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl RemoteQuery for GitHubClient {
    async fn get_branch(&self, name: &str) -> Result<BranchInfo, RemoteError> {
        let path = format!("/repos/{}/branches/{name}", self.options.repository);
        let branch: ApiBranch = self.get_json(&path, &[], Target::Branch(name)).await?;
        Ok(branch.into())
    }

    async fn commit_history(
        &self,
        head_sha: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawCommit>, RemoteError> {
        let path = format!("/repos/{}/commits", self.options.repository);
        let mut query = vec![("sha", head_sha.to_string())];
        if let Some(since) = since {
            query.push(("since", api_timestamp(since)));
        }

        let commits: Vec<ApiCommit> = self.get_paged(&path, &query, |_| true).await?;
        debug!(count = commits.len(), "Fetched commit history");
        Ok(commits.into_iter().map(RawCommit::from).collect())
    }

    async fn commit_pull_requests(&self, sha: &str) -> Result<Vec<PullRequestLink>, RemoteError> {
        let path = format!("/repos/{}/commits/{sha}/pulls", self.options.repository);
        let pulls: Vec<ApiPullRequest> = self.get_paged(&path, &[], |_| true).await?;
        Ok(pulls.into_iter().map(PullRequestLink::from).collect())
    }

    async fn closed_pull_requests(
        &self,
        base: &str,
        created_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PullRequest>, RemoteError> {
        let path = format!("/repos/{}/pulls", self.options.repository);
        let query = [
            ("state", "closed".to_string()),
            ("base", base.to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
        ];

        // Pages are newest first: once a page ends before the limit, the
        // remaining pages can only hold older pull requests
        let before_limit = |page: &[ApiPullRequest]| match (created_since, page.last()) {
            (Some(limit), Some(oldest)) => oldest.created_at >= limit,
            _ => true,
        };
        let pulls: Vec<ApiPullRequest> = self.get_paged(&path, &query, before_limit).await?;
        debug!(count = pulls.len(), base, "Fetched closed pull requests");
        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }

    async fn pull_request_commits(&self, number: u64) -> Result<Vec<RawCommit>, RemoteError> {
        let path = format!("/repos/{}/pulls/{number}/commits", self.options.repository);
        let commits: Vec<ApiCommit> = self.get_paged(&path, &[], |_| true).await?;
        Ok(commits.into_iter().map(RawCommit::from).collect())
    }
}
