// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tracked item matching
//!
//! Decides which tracked item (usually a ticket number) a commit message or a
//! branch name refers to. Both modes are token-exact: tracked item `123` is
//! never found inside `12345` or `67123`.
//!
//! # Example
//!
//! ```
//! use itemtrail_core::{ItemMatcher, MatchMode};
//!
//! let matcher = ItemMatcher::new(["ITEM-123", "456"], MatchMode::Strict);
//! assert_eq!(matcher.items(), ["123", "456"]);
//! assert_eq!(matcher.find_match("feature/ITEM-123-totals"), Some("123"));
//! assert_eq!(matcher.find_match("ITEM-12345"), None);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How tracked items are compared with free text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Items are reduced to their digits and compared with whole digit runs
    #[default]
    Strict,
    /// Items keep their characters and are found with digit boundaries respected
    Literal,
}

/// Strip every non-digit character (`"ITEM-1234"` becomes `"1234"`)
#[must_use]
pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Split text into its maximal runs of ASCII digits
pub fn digit_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
}

/// Check whether `item` occurs in `text` without touching neighbouring digits
///
/// If the item starts (ends) with a digit, the character before (after) the
/// occurrence must not be a digit.
#[must_use]
pub fn contains_bounded(text: &str, item: &str) -> bool {
    if item.is_empty() {
        return false;
    }

    let starts_with_digit = item.starts_with(|c: char| c.is_ascii_digit());
    let ends_with_digit = item.ends_with(|c: char| c.is_ascii_digit());

    text.match_indices(item).any(|(start, found)| {
        let end = start + found.len();
        let before_ok = !starts_with_digit
            || !text[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit());
        let after_ok =
            !ends_with_digit || !text[end..].chars().next().is_some_and(|c| c.is_ascii_digit());
        before_ok && after_ok
    })
}

/// Matches free text against an ordered list of tracked items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMatcher {
    items: Vec<String>,
    mode: MatchMode,
}

impl ItemMatcher {
    /// Create a matcher, normalizing the items for `mode`
    ///
    /// Strict mode strips non-digit characters. Items that end up empty are
    /// dropped; duplicates keep their first position.
    pub fn new<I, S>(items: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in items {
            let raw = raw.as_ref();
            let item = Self::normalize(raw, mode);
            if item.is_empty() {
                warn!(item = %raw, "Ignoring tracked item with nothing to match");
                continue;
            }
            if !normalized.contains(&item) {
                normalized.push(item);
            }
        }

        Self {
            items: normalized,
            mode,
        }
    }

    /// Normalize a single item the way [`ItemMatcher::new`] does
    #[must_use]
    pub fn normalize(raw: &str, mode: MatchMode) -> String {
        match mode {
            MatchMode::Strict => strip_non_digits(raw),
            MatchMode::Literal => raw.trim().to_string(),
        }
    }

    /// Normalized items in user order
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The matching mode
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// True when there is nothing to match; callers should ask for items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The first item, in user order, that `text` refers to
    #[must_use]
    pub fn find_match<'a>(&'a self, text: &'a str) -> Option<&'a str> {
        self.matches(text).next()
    }

    /// Every item `text` refers to, in user order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let tokens: Vec<&str> = match self.mode {
            MatchMode::Strict => digit_runs(text).collect(),
            MatchMode::Literal => Vec::new(),
        };

        self.items
            .iter()
            .filter(move |item| match self.mode {
                MatchMode::Strict => tokens.contains(&item.as_str()),
                MatchMode::Literal => contains_bounded(text, item),
            })
            .map(String::as_str)
    }
}
