// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for itemtrail
//!
//! This module provides the clap-derived [`Config`] and the helpers that turn
//! it into a settings file location, settings overrides and a log level.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::settings::Overrides;

/// File name looked up in the working directory and the config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// itemtrail - find, order and report the commits behind your ticket numbers
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "itemtrail")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the JSON settings file
    ///
    /// Defaults to ./settings.json when it exists, otherwise to
    /// settings.json in the itemtrail config directory.
    #[arg(short, long, env = "ITEMTRAIL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// GitHub access token, overriding GitHubToken from the settings file
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Item number to look for; repeat for several items
    ///
    /// When given, replaces ItemNumbers from the settings file.
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<String>,

    /// Directory that receives output.txt and output.xlsx
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "ITEMTRAIL_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the interactive result list as JSON on stdout
    #[arg(long, default_value = "false")]
    pub list_json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so reports on stdout stay clean.
    #[arg(short, long, default_value = "false", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the settings file path, using a default if not specified
    ///
    /// Lookup order: `--settings`, `./settings.json` when present, then the
    /// platform config directory:
    /// - macOS: ~/Library/Application Support/itemtrail/settings.json
    /// - Linux: ~/.config/itemtrail/settings.json
    /// - Windows: %APPDATA%\itemtrail\settings.json
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        if let Some(path) = &self.settings {
            return path.clone();
        }
        let local = Path::new(SETTINGS_FILE_NAME);
        if local.is_file() {
            return local.to_path_buf();
        }
        dirs::config_dir()
            .map(|dir| dir.join("itemtrail").join(SETTINGS_FILE_NAME))
            .unwrap_or_else(|| local.to_path_buf())
    }

    /// Values that take precedence over the settings file
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            token: self.token.clone().filter(|t| !t.trim().is_empty()),
            items: self.items.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
