// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for itemtrail-github

use thiserror::Error;

/// Errors that can occur while querying the remote repository service
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The access token was rejected
    #[error("GitHub rejected the access token (bad credentials)")]
    BadCredentials,

    /// The repository does not exist or the token cannot see it
    #[error("Repository not found: {name}")]
    RepositoryNotFound {
        /// The repository name that could not be resolved
        name: String,
    },

    /// The branch does not exist in the repository
    #[error("Branch not found: {name}")]
    BranchNotFound {
        /// The branch name that could not be resolved
        name: String,
    },

    /// Any other unsuccessful API response
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the API, or the raw body
        message: String,
    },

    /// Transport error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected response payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemoteError {
    /// True for the conditions that mean the run cannot start
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::BadCredentials | Self::RepositoryNotFound { .. } | Self::BranchNotFound { .. }
        )
    }
}
