// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! itemtrail-github: remote repository queries for itemtrail
//!
//! This library crate defines the read-only [`RemoteQuery`] interface the
//! collection engine runs against, and [`GitHubClient`], its implementation
//! over the GitHub REST API.

#![warn(missing_docs)]

//! ## Errors
//!
//! Known remote conditions are classified into named [`RemoteError`]
//! variants: a rejected token, a repository or branch that does not resolve.
//! Every other unsuccessful response is reported as `RemoteError::Api` with
//! the status and the message GitHub returned.
//!
//! ## Connecting
//!
//! ```rust,no_run
//! use itemtrail_github::{ConnectOptions, GitHubClient, RemoteQuery};
//!
//! # async fn run() -> Result<(), itemtrail_github::RemoteError> {
//! let options = ConnectOptions::new("ghp_token", "acme/app");
//! let client = GitHubClient::connect(options).await?;
//! let branch = client.get_branch("develop").await?;
//! let history = client.commit_history(&branch.head_sha, None).await?;
//! println!("{} commits on {}", history.len(), branch.name);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod remote;

pub use client::{ConnectOptions, DEFAULT_API_BASE, GitHubClient};
pub use error::RemoteError;
pub use remote::{BranchInfo, PullRequest, PullRequestLink, RemoteQuery};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{ConnectOptions, GitHubClient};
    pub use crate::error::RemoteError;
    pub use crate::remote::{BranchInfo, PullRequest, PullRequestLink, RemoteQuery};
}
