// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Settings file loading tests

mod test_utils;

use chrono::{TimeZone, Utc};
use itemtrail::settings::{ConfigError, Overrides, RunConfig, Settings};
use itemtrail_core::{MatchMode, SortDirection};
use similar_asserts::assert_eq;
use test_utils::TempTestDir;

const MINIMAL: &str = r#"{
    "GitHubToken": "ghp_example",
    "TargetRepository": "acme/app",
    "TargetBranch": "main",
    "ItemNumbers": ["ITEM-1234"],
    "UseCommitHistory": true,
    "SearchLimitMonths": 3
}"#;

#[test]
fn test_load_minimal_settings() {
    let dir = TempTestDir::new("load_minimal");
    let path = dir.create_file("settings.json", MINIMAL);

    let settings = Settings::load(&path).expect("settings load");
    let now = Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap();
    let config = RunConfig::from_settings(settings, Overrides::default(), now)
        .expect("settings validate");

    assert_eq!(config.remote.repository, "acme/app");
    assert_eq!(config.collection.items, ["ITEM-1234"]);
    assert_eq!(config.collection.matcher().items(), ["1234"]);
    assert_eq!(config.collection.match_mode, MatchMode::Strict);
    assert!(!config.collection.use_pull_requests);
    assert_eq!(
        config.collection.since,
        Some(Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()),
        "month arithmetic clamps to the end of February"
    );
    assert_eq!(config.output.direction, SortDirection::Ascending);
    assert!(config.output.details.message);
    assert!(!config.output.details.cherry_pick_command);
}

#[test]
fn test_rejects_non_json_extension() {
    let dir = TempTestDir::new("non_json");
    let path = dir.create_file("settings.txt", MINIMAL);

    let err = Settings::load(&path).expect_err("extension is checked first");
    assert!(matches!(err, ConfigError::NotJson { .. }), "got {err:?}");
    assert!(err.to_string().contains("must be a '.json' file"));
}

#[test]
fn test_missing_file() {
    let dir = TempTestDir::new("missing");
    let err = Settings::load(&dir.path().join("settings.json")).expect_err("file is absent");
    assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
}

#[test]
fn test_syntax_error_reports_line() {
    let dir = TempTestDir::new("syntax");
    let path = dir.create_file(
        "settings.json",
        "{\n    \"TargetRepository\": \"acme/app\",\n    \"TargetBranch\": main\n}\n",
    );

    let err = Settings::load(&path).expect_err("bare word is not JSON");
    match &err {
        ConfigError::Syntax { line, .. } => assert_eq!(*line, 3),
        other => panic!("expected a syntax error, got {other:?}"),
    }
    assert!(err.to_string().contains("has an error on line 3"));
}

#[test]
fn test_wrong_value_type_is_a_syntax_error() {
    let dir = TempTestDir::new("wrong_type");
    let path = dir.create_file("settings.json", r#"{ "UsePullRequests": "yes" }"#);
    let err = Settings::load(&path).expect_err("booleans are required");
    assert!(matches!(err, ConfigError::Syntax { line: 1, .. }), "got {err:?}");
}

#[test]
fn test_missing_token_without_override() {
    let dir = TempTestDir::new("missing_token");
    let path = dir.create_file(
        "settings.json",
        r#"{ "TargetRepository": "acme/app", "TargetBranch": "main", "GitHubToken": "  " }"#,
    );
    let settings = Settings::load(&path).expect("settings load");

    let err = RunConfig::from_settings(settings.clone(), Overrides::default(), Utc::now())
        .expect_err("blank token");
    assert!(matches!(err, ConfigError::MissingSetting { name: "GitHubToken" }), "got {err:?}");

    let overrides = Overrides {
        token: Some("ghp_from_env".into()),
        ..Default::default()
    };
    let config = RunConfig::from_settings(settings, overrides, Utc::now()).expect("token supplied");
    assert_eq!(config.remote.token, "ghp_from_env");
}
