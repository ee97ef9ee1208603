// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Collection engine
//!
//! A run goes `Idle -> CollectingHistory -> CollectingPullRequests -> Done`.
//! Either phase may be disabled. Phases run one after the other; inside a
//! phase every matched commit or pull request is a unit of work, and with
//! concurrent fetching enabled each unit runs as its own tokio task. All
//! units save into one [`CommitStore`] behind a mutex, so every save is
//! atomic whatever order the units finish in.

use std::fmt;
use std::sync::Arc;

use itemtrail_core::ordering::{flat_order, grouped_order};
use itemtrail_core::{
    CommitRecord, CommitStore, ItemGroup, ItemMatcher, PullRequests, RawCommit, RecordBuilder,
    ReplayCommand, SortDirection,
};
use itemtrail_github::{RemoteError, RemoteQuery};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::prompt::ItemPrompt;
use crate::settings::CollectionConfig;

/// Collection errors
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The remote service failed
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// No items were configured and none were entered
    #[error("No item numbers to search for")]
    NoItems,

    /// The manual item prompt failed
    #[error("Failed to read item numbers: {0}")]
    Prompt(#[source] std::io::Error),

    /// A collection task panicked or was cancelled
    #[error("Collection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Discovery phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Linear history scan of the target branch
    History,
    /// Scan of closed pull requests into the target branch
    PullRequests,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History => f.write_str("commit history"),
            Self::PullRequests => f.write_str("pull requests"),
        }
    }
}

/// Progress notifications emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A phase began
    PhaseStarted(Phase),
    /// A commit message or pull request branch matched an item
    Matched {
        /// Phase of the match
        phase: Phase,
        /// Matched item
        item: String,
    },
    /// A phase finished
    PhaseCompleted {
        /// Finished phase
        phase: Phase,
        /// Store size after the phase
        stored: usize,
    },
}

type ProgressFn = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Commits collected by a successful run
#[derive(Debug, Clone)]
pub struct CollectedCommits {
    store: CommitStore,
    items: Vec<String>,
}

impl CollectedCommits {
    /// Wrap a store and the normalized items it was collected for
    #[must_use]
    pub fn new(store: CommitStore, items: Vec<String>) -> Self {
        Self { store, items }
    }

    /// The store
    #[must_use]
    pub fn store(&self) -> &CommitStore {
        &self.store
    }

    /// Tracked items in user order
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of commits
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if nothing was collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All commits sorted by date
    #[must_use]
    pub fn flat(&self, direction: SortDirection) -> Vec<&CommitRecord> {
        flat_order(&self.store, direction)
    }

    /// Commits grouped by item
    #[must_use]
    pub fn grouped(&self, direction: SortDirection) -> Vec<ItemGroup<'_>> {
        grouped_order(&self.store, &self.items, direction)
    }

    /// Replay instruction for every commit of the run
    #[must_use]
    pub fn replay(&self, command: &ReplayCommand) -> String {
        command.render(self.store.records())
    }
}

/// Result of a run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// At least one commit was collected
    Commits(CollectedCommits),
    /// The run succeeded but found nothing
    NoCommits {
        /// Items that were searched for
        items: Vec<String>,
    },
}

impl RunOutcome {
    fn from_collected(collected: CollectedCommits) -> Self {
        if collected.is_empty() {
            Self::NoCommits {
                items: collected.items,
            }
        } else {
            Self::Commits(collected)
        }
    }

    /// Number of commits collected
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Commits(collected) => collected.len(),
            Self::NoCommits { .. } => 0,
        }
    }

    /// True if the run found nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs the discovery phases against a remote
pub struct Collector<R> {
    remote: Arc<R>,
    config: CollectionConfig,
    branch: String,
    builder: RecordBuilder,
    progress: Option<ProgressFn>,
}

impl<R> fmt::Debug for Collector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("config", &self.config)
            .field("branch", &self.branch)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

/// Shared state handed to every unit of work
struct Unit<R> {
    remote: Arc<R>,
    store: Arc<Mutex<CommitStore>>,
    builder: RecordBuilder,
}

impl<R> Clone for Unit<R> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            store: Arc::clone(&self.store),
            builder: self.builder,
        }
    }
}

impl<R: RemoteQuery> Unit<R> {
    async fn save(&self, commit: &RawCommit, item: &str, pull_requests: &PullRequests) {
        let record = self.builder.build(commit, item, pull_requests);
        let sha = record.sha.clone();
        let outcome = self.store.lock().await.save(record);
        debug!(%sha, item, ?outcome, "Saved commit");
    }

    /// History unit: look up the commit's pull requests, then save it
    async fn history_commit(self, commit: RawCommit, item: String) -> Result<(), RemoteError> {
        let urls = self
            .remote
            .commit_pull_requests(&commit.sha)
            .await?
            .into_iter()
            .map(|pr| pr.html_url)
            .collect();
        self.save(&commit, &item, &PullRequests::Many(urls)).await;
        Ok(())
    }

    /// Pull request unit: save every commit of the pull request
    async fn pull_request(self, number: u64, url: String, item: String) -> Result<(), RemoteError> {
        let single = PullRequests::Single(url);
        for commit in self.remote.pull_request_commits(number).await? {
            self.save(&commit, &item, &single).await;
        }
        Ok(())
    }
}

impl<R: RemoteQuery + 'static> Collector<R> {
    /// Collector for `branch` of `remote`
    pub fn new(remote: Arc<R>, branch: impl Into<String>, config: CollectionConfig) -> Self {
        let builder = config.record_builder();
        Self {
            remote,
            config,
            branch: branch.into(),
            builder,
            progress: None,
        }
    }

    /// Report progress to `callback`
    #[must_use]
    pub fn with_progress(mut self, callback: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(callback));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(progress) = &self.progress {
            progress(event);
        }
    }

    /// Resolve the items, then run the enabled phases
    ///
    /// When no items are configured, `prompt` is asked for some first.
    ///
    /// # Errors
    ///
    /// Returns `CollectError::NoItems` if no items are available,
    /// `CollectError::Remote` for the first remote failure (including a
    /// missing branch) and `CollectError::Task` if a unit of work panics.
    /// Commits saved before a failure are discarded with the store.
    pub async fn run(self, prompt: &mut dyn ItemPrompt) -> Result<RunOutcome, CollectError> {
        let mut matcher = self.config.matcher();
        if matcher.is_empty() {
            let entered = prompt
                .request_items(self.config.match_mode)
                .map_err(CollectError::Prompt)?;
            matcher = ItemMatcher::new(entered.unwrap_or_default(), self.config.match_mode);
            if matcher.is_empty() {
                return Err(CollectError::NoItems);
            }
        }

        let store = Arc::new(Mutex::new(
            CommitStore::new().ignoring_merge_commits(self.config.ignore_merge_commits),
        ));
        self.collect_into(&matcher, &store).await?;

        let store = match Arc::try_unwrap(store) {
            Ok(store) => store.into_inner(),
            Err(shared) => shared.lock().await.clone(),
        };
        info!(commits = store.len(), items = matcher.items().len(), "Collection finished");

        Ok(RunOutcome::from_collected(CollectedCommits::new(
            store,
            matcher.items().to_vec(),
        )))
    }

    /// Run the enabled phases into `store`
    ///
    /// Records saved before an error stay in `store`.
    ///
    /// # Errors
    ///
    /// Returns the first remote or task failure.
    pub async fn collect_into(
        &self,
        matcher: &ItemMatcher,
        store: &Arc<Mutex<CommitStore>>,
    ) -> Result<(), CollectError> {
        if !self.config.use_commit_history && !self.config.use_pull_requests {
            return Ok(());
        }

        let branch = self.remote.get_branch(&self.branch).await?;
        debug!(branch = %branch.name, head = %branch.head_sha, "Resolved target branch");

        let unit = Unit {
            remote: Arc::clone(&self.remote),
            store: Arc::clone(store),
            builder: self.builder,
        };

        if self.config.use_commit_history {
            self.history_phase(matcher, &unit, &branch.head_sha).await?;
        }
        if self.config.use_pull_requests {
            self.pull_request_phase(matcher, &unit).await?;
        }
        Ok(())
    }

    async fn history_phase(
        &self,
        matcher: &ItemMatcher,
        unit: &Unit<R>,
        head_sha: &str,
    ) -> Result<(), CollectError> {
        let phase = Phase::History;
        info!(%phase, branch = %self.branch, since = ?self.config.since, "Phase started");
        self.emit(ProgressEvent::PhaseStarted(phase));

        let commits = self.remote.commit_history(head_sha, self.config.since).await?;
        let mut tasks = JoinSet::new();
        for commit in commits {
            let Some(item) = matcher.find_match(&commit.message) else {
                continue;
            };
            let item = item.to_string();
            debug!(sha = %commit.sha, %item, "Commit message matched");
            self.emit(ProgressEvent::Matched {
                phase,
                item: item.clone(),
            });

            let work = unit.clone().history_commit(commit, item);
            if self.config.concurrent {
                tasks.spawn(work);
            } else {
                work.await?;
            }
        }
        drain(tasks).await?;

        self.phase_completed(phase, unit).await;
        Ok(())
    }

    async fn pull_request_phase(
        &self,
        matcher: &ItemMatcher,
        unit: &Unit<R>,
    ) -> Result<(), CollectError> {
        let phase = Phase::PullRequests;
        info!(%phase, branch = %self.branch, since = ?self.config.since, "Phase started");
        self.emit(ProgressEvent::PhaseStarted(phase));

        let pulls = self
            .remote
            .closed_pull_requests(&self.branch, self.config.since)
            .await?;
        let mut tasks = JoinSet::new();
        for pull in pulls {
            if let Some(limit) = self.config.since
                && pull.created_at < limit
            {
                debug!(number = pull.number, "Reached the search date limit");
                break;
            }
            if !pull.merged {
                continue;
            }
            let Some(item) = matcher.find_match(&pull.head_ref) else {
                continue;
            };
            let item = item.to_string();
            debug!(number = pull.number, head = %pull.head_ref, %item, "Pull request matched");
            self.emit(ProgressEvent::Matched {
                phase,
                item: item.clone(),
            });

            let work = unit.clone().pull_request(pull.number, pull.html_url, item);
            if self.config.concurrent {
                tasks.spawn(work);
            } else {
                work.await?;
            }
        }
        drain(tasks).await?;

        self.phase_completed(phase, unit).await;
        Ok(())
    }

    async fn phase_completed(&self, phase: Phase, unit: &Unit<R>) {
        let stored = unit.store.lock().await.len();
        info!(%phase, stored, "Phase completed");
        self.emit(ProgressEvent::PhaseCompleted { phase, stored });
    }
}

/// Wait for every task; the first failure drops the set, aborting the rest
async fn drain(mut tasks: JoinSet<Result<(), RemoteError>>) -> Result<(), CollectError> {
    while let Some(joined) = tasks.join_next().await {
        joined??;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::History.to_string(), "commit history");
        assert_eq!(Phase::PullRequests.to_string(), "pull requests");
    }

    #[test]
    fn test_empty_store_is_no_commits() {
        let outcome =
            RunOutcome::from_collected(CollectedCommits::new(CommitStore::new(), vec!["1".into()]));
        match outcome {
            RunOutcome::NoCommits { items } => assert_eq!(items, ["1"]),
            RunOutcome::Commits(_) => panic!("empty store must not report commits"),
        }
    }

    #[test]
    fn test_no_items_message() {
        assert_eq!(CollectError::NoItems.to_string(), "No item numbers to search for");
    }
}
