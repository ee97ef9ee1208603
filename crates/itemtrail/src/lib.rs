// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! itemtrail library
//!
//! This module exports the collection pipeline and the report sinks of the
//! itemtrail command-line tool for use in integration tests and as a library.

pub mod app;
pub mod collect;
pub mod config;
pub mod output;
pub mod prompt;
pub mod settings;

pub use collect::{CollectError, CollectedCommits, Collector, ProgressEvent, RunOutcome};
pub use config::Config;
pub use output::{OutputError, RecordSink, Report};
pub use settings::{ConfigError, RunConfig, Settings};
