// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use crate::reading::FieldAccess;
use crate::resolve::extractor::{extract_role, FieldRole};

/// One label/value pair of a [`ReadingIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    label: String,
    folded: String,
    value: String,
}

impl IndexEntry {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Lower-cased label used for matching.
    pub(crate) fn folded(&self) -> &str {
        &self.folded
    }
}

/// Case-insensitive label -> raw value mapping for one batch of readings.
///
/// Labels are unique ignoring case and the first writer wins. Entries keep
/// insertion order, which the resolver uses as its tie-break.
#[derive(Debug, Clone, Default)]
pub struct ReadingIndex {
    entries: Vec<IndexEntry>,
    keys: HashSet<String>,
}

impl ReadingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a batch of readings.
    ///
    /// Records without a usable label or value are skipped. Sources sometimes
    /// expose the same reading twice; only the first one is kept.
    pub fn build<'a, I, R>(readings: I) -> Self
    where
        I: IntoIterator<Item = &'a R>,
        R: FieldAccess + ?Sized + 'a,
    {
        let mut index = Self::new();
        for (position, reading) in readings.into_iter().enumerate() {
            let label = extract_role(reading, FieldRole::Label);
            let value = extract_role(reading, FieldRole::Value);
            match (label, value) {
                (Some(label), Some(value)) => {
                    if !index.insert(label, value) {
                        tracing::trace!("Skipping reading #{position}: empty or duplicate label");
                    }
                }
                _ => tracing::trace!("Skipping reading #{position}: no label or value field"),
            }
        }
        index
    }

    /// Insert a pair unless the label is empty, the value is empty, or the
    /// label is already present. Returns whether the pair was stored.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> bool {
        let label = label.into();
        let value = value.into();
        if label.is_empty() || value.is_empty() {
            return false;
        }

        let folded = label.to_lowercase();
        if !self.keys.insert(folded.clone()) {
            return false;
        }

        self.entries.push(IndexEntry {
            label,
            folded,
            value,
        });
        true
    }

    /// Look a label up ignoring case.
    pub fn get(&self, label: &str) -> Option<&str> {
        let folded = label.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.folded == folded)
            .map(IndexEntry::value)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.keys.contains(&label.to_lowercase())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReadingIndex {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
