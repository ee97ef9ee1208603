//! Integration tests for itemtrail-github
//!
//! These tests verify conversion of recorded GitHub REST payloads and the
//! behaviour of the client when the API cannot be reached.

use std::path::Path;

use itemtrail_core::{ItemMatcher, MatchMode, RawCommit};
use itemtrail_github::api::{ApiCommit, ApiPullRequest};
use itemtrail_github::{ConnectOptions, GitHubClient, PullRequest, RemoteError};

/// Get the fixtures directory for test data
fn fixtures_dir() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    Path::new(&manifest_dir).join("tests/fixtures")
}

fn load_commits() -> Vec<RawCommit> {
    let content = std::fs::read_to_string(fixtures_dir().join("commits-page.json"))
        .expect("Failed to read commits-page.json fixture");
    let page: Vec<ApiCommit> = serde_json::from_str(&content).expect("Failed to parse commits");
    page.into_iter().map(RawCommit::from).collect()
}

fn load_pulls() -> Vec<PullRequest> {
    let content = std::fs::read_to_string(fixtures_dir().join("closed-pulls-page.json"))
        .expect("Failed to read closed-pulls-page.json fixture");
    let page: Vec<ApiPullRequest> = serde_json::from_str(&content).expect("Failed to parse pulls");
    page.into_iter().map(PullRequest::from).collect()
}

#[test]
fn test_commit_page_conversion() {
    let commits = load_commits();
    assert_eq!(commits.len(), 3);

    assert!(commits[0].is_merge(), "two parents make a merge commit");
    assert!(!commits[1].is_merge());
    assert_eq!(commits[2].parent_count, 0, "root commit has no parents");

    // Author dates keep their original offsets
    assert_eq!(commits[0].authored_at.to_rfc3339(), "2024-01-15T10:02:11+01:00");
    assert_eq!(commits[2].authored_at.to_rfc3339(), "2023-12-20T16:45:00-05:00");
}

#[test]
fn test_commit_page_matching() {
    let commits = load_commits();
    let matcher = ItemMatcher::new(["ITEM-1234", "123"], MatchMode::Strict);

    let matched: Vec<Option<&str>> = commits.iter().map(|c| matcher.find_match(&c.message)).collect();
    assert_eq!(matched, [Some("1234"), Some("1234"), None]);
}

#[test]
fn test_closed_pull_page_conversion() {
    let pulls = load_pulls();
    assert_eq!(pulls.len(), 2);

    assert_eq!(pulls[0].number, 42);
    assert_eq!(pulls[0].head_ref, "feature/ITEM-1234");
    assert!(pulls[0].merged);

    assert!(!pulls[1].merged, "closed without merging");
    assert!(pulls[0].created_at > pulls[1].created_at, "newest first");
}

#[tokio::test]
async fn test_connect_reports_transport_errors() {
    // Nothing listens on the discard port of the loopback interface
    let options = ConnectOptions::new("token", "acme/app").with_api_base("http://127.0.0.1:9");
    let err = GitHubClient::connect(options)
        .await
        .expect_err("connection should fail");

    assert!(matches!(err, RemoteError::Http(_)), "unexpected error: {err}");
    assert!(!err.is_setup_error());
}
