// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! itemtrail-core: ticket matching and commit bookkeeping for itemtrail
//!
//! This library crate holds the parts of itemtrail that need no network:
//! matching tracked items against commit messages and branch names, turning
//! remote commits into records, deduplicating them, and ordering them for
//! display and replay.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use chrono::DateTime;
//! use itemtrail_core::{
//!     CommitStore, ItemMatcher, MatchMode, PullRequests, RawCommit, RecordBuilder,
//!     ReplayCommand,
//! };
//!
//! let matcher = ItemMatcher::new(["ITEM-42"], MatchMode::Strict);
//! let commit = RawCommit {
//!     sha: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
//!     message: "ITEM-42 fix rounding".to_string(),
//!     author_name: "Uni".to_string(),
//!     author_email: "uni@example.com".to_string(),
//!     authored_at: DateTime::parse_from_rfc3339("2024-01-12T08:30:02Z").unwrap(),
//!     html_url: "https://github.com/acme/app/commit/1945ab9".to_string(),
//!     parent_count: 1,
//! };
//!
//! let mut store = CommitStore::new();
//! if let Some(item) = matcher.find_match(&commit.message) {
//!     let record = RecordBuilder::new()
//!         .with_short_sha(10)
//!         .build(&commit, item, &PullRequests::Many(vec![]));
//!     store.save(record);
//! }
//!
//! let replay = ReplayCommand::default().render(store.records());
//! assert_eq!(replay, "git cherry-pick 1945ab9c75");
//! ```

pub mod matcher;
pub mod ordering;
pub mod record;
pub mod store;

pub use matcher::{ItemMatcher, MatchMode};
pub use ordering::{ItemGroup, ReplayCommand, SortDirection};
pub use record::{CommitRecord, NO_PULL_REQUEST, PullRequests, RawCommit, RecordBuilder};
pub use store::{CommitStore, SaveOutcome};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::matcher::{ItemMatcher, MatchMode};
    pub use crate::ordering::{ItemGroup, ReplayCommand, SortDirection};
    pub use crate::record::{CommitRecord, PullRequests, RawCommit, RecordBuilder};
    pub use crate::store::CommitStore;
}
