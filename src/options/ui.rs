use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
/// Persisted front-end state handed over at startup.
///
/// Nothing in the core reads these; they live here so the host has one file
/// to persist instead of ad-hoc global storage.
pub struct UiOptions {
    /// Hint/tutorial banners the user has dismissed.
    pub dismissed_hints: BTreeSet<String>,
}

impl UiOptions {
    /// Record a dismissed hint. Returns `false` if it already was.
    pub fn dismiss(&mut self, hint: &str) -> bool {
        self.dismissed_hints.insert(hint.to_owned())
    }

    /// Whether the hint was dismissed.
    #[must_use]
    pub fn is_dismissed(&self, hint: &str) -> bool {
        self.dismissed_hints.contains(hint)
    }
}
