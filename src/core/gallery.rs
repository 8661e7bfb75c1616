//! The ordered list of stored photo identifiers.

use serde::{Deserialize, Serialize};

/// Photo identifiers in capture order.
///
/// Duplicates are allowed; removal drops every exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallery {
    entries: Vec<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, identifier: impl Into<String>) {
        self.entries.push(identifier.into());
    }

    /// Removes every entry equal to `identifier`, returning how many went.
    pub fn remove_all(&mut self, identifier: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry != identifier);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

impl From<Vec<String>> for Gallery {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
