// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! itemtrail: find the commits that mention your ticket numbers
//!
//! This binary reads a JSON settings file, walks a GitHub branch and its
//! merged pull requests, and reports every commit whose message mentions a
//! tracked item number.

use std::process::ExitCode;

use clap::Parser;
use itemtrail::Config;
use itemtrail::app::{self, explain, exit_code};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting itemtrail...");

    match app::run(&config).await {
        Ok(outcome) => {
            info!(commits = outcome.len(), "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match explain(&err) {
                Some(message) => eprintln!("{message}"),
                None => eprintln!("Error: {err:#}"),
            }
            exit_code(&err)
        }
    }
}
