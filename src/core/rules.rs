//! Title-based inclusion/exclusion filtering.
//!
//! Rules are plain substrings compared case-insensitively against a
//! document title. A title is kept when it matches at least one
//! inclusion rule (or there are none) and matches no exclusion rule.
//! Exclusion wins when a title matches both lists.

use crate::core::types::{StructuredDocument, TextDocument};

/// Anything that carries a title the rules can be matched against
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for TextDocument {
    fn title(&self) -> &str {
        TextDocument::title(self)
    }
}

impl Titled for StructuredDocument {
    fn title(&self) -> &str {
        self.title_or_empty()
    }
}

impl Titled for crate::core::types::DriveFile {
    fn title(&self) -> &str {
        &self.name
    }
}

/// Compiled inclusion/exclusion rules (stored lowercased)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRules {
    inclusion: Vec<String>,
    exclusion: Vec<String>,
}

impl TitleRules {
    /// Create rules from raw strings. Empty strings are dropped since
    /// they would match every title.
    pub fn new<I, E, S, T>(inclusion: I, exclusion: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        fn normalize<X: AsRef<str>>(rules: impl IntoIterator<Item = X>) -> Vec<String> {
            rules
                .into_iter()
                .map(|r| r.as_ref().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect()
        }

        Self {
            inclusion: normalize(inclusion),
            exclusion: normalize(exclusion),
        }
    }

    /// True when neither list has any rule
    pub fn is_identity(&self) -> bool {
        self.inclusion.is_empty() && self.exclusion.is_empty()
    }

    /// Decide whether a title is kept
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();

        if !self.inclusion.is_empty() && !self.inclusion.iter().any(|r| title.contains(r)) {
            return false;
        }

        !self.exclusion.iter().any(|r| title.contains(r))
    }

    /// Keep the items whose title passes, preserving order
    pub fn apply<T: Titled>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_identity() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.matches(item.title()))
            .collect()
    }
}
