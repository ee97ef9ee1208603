// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One command-line run from settings to reports

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use chrono::Utc;
use itemtrail_github::{GitHubClient, RemoteError};
use tracing::{info, warn};

use crate::collect::{CollectError, Collector, ProgressEvent, RunOutcome};
use crate::config::Config;
use crate::output::{JsonListSink, RecordSink, Report, configured_sinks};
use crate::prompt::{PromptStream, StdinPrompt};
use crate::settings::{ConfigError, RunConfig, Settings};

/// Load settings, collect commits and write every enabled report
///
/// # Errors
///
/// Returns settings, remote, collection and output errors with context.
pub async fn run(config: &Config) -> anyhow::Result<RunOutcome> {
    let path = config.settings_path();
    info!(path = %path.display(), "Loading settings");
    let settings = Settings::load(&path)?;
    let run_config = RunConfig::from_settings(settings, config.overrides(), Utc::now())?;

    let client = GitHubClient::connect(run_config.remote.connect_options()).await?;
    let mut collector = Collector::new(
        Arc::new(client),
        run_config.remote.branch.clone(),
        run_config.collection.clone(),
    );

    // Progress goes to stdout after any item prompt, as one line of dots
    let started = Arc::new(AtomicBool::new(false));
    if run_config.output.to_terminal && !config.list_json {
        let started = Arc::clone(&started);
        collector = collector.with_progress(move |event| {
            match event {
                ProgressEvent::PhaseStarted(_) if !started.swap(true, Ordering::Relaxed) => {
                    print!("Fetching commits");
                }
                ProgressEvent::Matched { .. } => print!("."),
                _ => return,
            }
            let _ = std::io::stdout().flush();
        });
    }

    let mut prompt = StdinPrompt::terminal(prompt_stream(config));
    let outcome = collector.run(&mut prompt).await?;
    if started.load(Ordering::Relaxed) {
        println!();
    }

    write_reports(config, &run_config, &outcome)?;
    Ok(outcome)
}

/// The item prompt stays off stdout when stdout carries the JSON list
fn prompt_stream(config: &Config) -> PromptStream {
    if config.list_json {
        PromptStream::Stderr
    } else {
        PromptStream::Stdout
    }
}

fn write_reports(config: &Config, run_config: &RunConfig, outcome: &RunOutcome) -> anyhow::Result<()> {
    let report = Report::from_outcome(outcome, &run_config.output);

    let mut output = run_config.output.clone();
    if config.list_json {
        // stdout carries the JSON list alone
        output.to_terminal = false;
    }
    let mut sinks = configured_sinks(&output);
    if config.list_json {
        sinks.push(Box::new(JsonListSink::stdout()));
    }
    if sinks.is_empty() {
        warn!("No output is enabled; set OutputToTerminal, OutputToTxtFile or OutputToExcelFile");
    }

    for sink in &mut sinks {
        sink.write(&report)
            .with_context(|| format!("Failed to write the {} report", sink.name()))?;
    }
    Ok(())
}

/// Exit codes of the command-line tool
pub mod exit {
    /// Settings are missing or invalid
    pub const CONFIG: u8 = 2;
    /// GitHub rejected the token
    pub const BAD_CREDENTIALS: u8 = 3;
    /// The repository does not resolve
    pub const REPOSITORY_NOT_FOUND: u8 = 4;
    /// The branch does not resolve
    pub const BRANCH_NOT_FOUND: u8 = 5;
    /// No items were configured or entered
    pub const NO_ITEMS: u8 = 6;
    /// Anything else
    pub const FAILURE: u8 = 1;
}

/// The remote condition behind `err`, if it stops a run before collection
fn setup_error(err: &anyhow::Error) -> Option<&RemoteError> {
    err.downcast_ref::<RemoteError>()
        .or_else(|| match err.downcast_ref::<CollectError>() {
            Some(CollectError::Remote(remote)) => Some(remote),
            _ => None,
        })
        .filter(|remote| remote.is_setup_error())
}

/// A user-facing explanation for the conditions a user can fix
#[must_use]
pub fn explain(err: &anyhow::Error) -> Option<String> {
    if let Some(remote) = setup_error(err) {
        return match remote {
            RemoteError::BadCredentials => Some(
                "GitHub responded with a Bad Credentials error. Please ensure that your \
                 GitHubToken is valid and has the required permissions, then try again."
                    .to_string(),
            ),
            RemoteError::RepositoryNotFound { name } => Some(format!(
                "Could not find the target repository '{name}'. Please ensure that your \
                 TargetRepository is correct and your GitHubToken has the required \
                 permissions to view the repository, then try again."
            )),
            RemoteError::BranchNotFound { name } => Some(format!(
                "Could not find the target branch '{name}'. Please ensure that your \
                 TargetBranch exists, then try again."
            )),
            _ => None,
        };
    }
    match err.downcast_ref::<CollectError>() {
        Some(CollectError::NoItems) => Some(
            "Be sure to enter the item numbers you need commits for in your settings file."
                .to_string(),
        ),
        _ => None,
    }
}

/// Process exit code for a failed run
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(remote) = setup_error(err) {
        return match remote {
            RemoteError::BadCredentials => exit::BAD_CREDENTIALS,
            RemoteError::RepositoryNotFound { .. } => exit::REPOSITORY_NOT_FOUND,
            RemoteError::BranchNotFound { .. } => exit::BRANCH_NOT_FOUND,
            _ => exit::FAILURE,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return exit::CONFIG;
    }
    match err.downcast_ref::<CollectError>() {
        Some(CollectError::NoItems) => exit::NO_ITEMS,
        _ => exit::FAILURE,
    }
}
