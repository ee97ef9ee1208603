// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for itemtrail integration tests
//!
//! This module provides temporary directories for settings files and
//! report output.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is automatically cleaned up when dropped
///
/// Each test gets its own directory so concurrent tests never share
/// settings or output files.
pub struct TempTestDir {
    path: PathBuf,
    cleanup: bool,
}

impl TempTestDir {
    /// Create a new temporary test directory
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "itemtrail-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);

        fs::create_dir_all(&path).expect("Failed to create temp test directory");

        Self {
            path,
            cleanup: true,
        }
    }

    /// Create a temp directory and don't clean it up (for debugging)
    #[allow(dead_code)]
    pub fn new_persistent(test_name: &str) -> Self {
        let mut temp = Self::new(test_name);
        temp.cleanup = false;
        eprintln!("Persistent temp dir: {}", temp.path.display());
        temp
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file within the temp directory with the given content
    #[allow(dead_code)]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the temp directory
    #[allow(dead_code)]
    pub fn read_file(&self, relative_path: &str) -> String {
        let file_path = self.path.join(relative_path);
        fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the temp directory
    #[allow(dead_code)]
    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.path.join(relative_path).exists()
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.cleanup && self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
