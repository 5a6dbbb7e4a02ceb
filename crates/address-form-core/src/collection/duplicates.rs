//! Cross-entry duplicate detection.
//!
//! Scoped to one edited entry against every other entry, not an all-pairs
//! scan. Equality is symmetric, so editing either side of a collision
//! reports it.

use crate::models::{AddressEntry, AddressField, DuplicateWarning};
use crate::settings::FormSettings;

/// Compares identity fields of an edited entry with the rest of a collection.
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    identity_fields: Vec<AddressField>,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateDetector {
    /// Create a detector over the default identity fields.
    pub fn new() -> Self {
        Self::from_settings(&FormSettings::default())
    }

    pub fn from_settings(settings: &FormSettings) -> Self {
        Self::with_fields(settings.identity_fields.clone())
    }

    pub fn with_fields(identity_fields: Vec<AddressField>) -> Self {
        Self { identity_fields }
    }

    pub fn identity_fields(&self) -> &[AddressField] {
        &self.identity_fields
    }

    /// Warnings for the entry at `edited_index` against all others.
    ///
    /// Ordered by other entry position, then identity field order. Repeats
    /// across different other entries are kept.
    pub fn detect<'a, I>(&self, edited_index: usize, entries: I) -> Vec<DuplicateWarning>
    where
        I: IntoIterator<Item = &'a AddressEntry>,
        I::IntoIter: Clone,
    {
        let iter = entries.into_iter();
        let Some(edited) = iter.clone().nth(edited_index) else {
            return Vec::new();
        };

        iter.enumerate()
            .filter(|(i, _)| *i != edited_index)
            .flat_map(|(i, other)| self.compare(edited, other, i))
            .collect()
    }

    /// Warnings for one pair of entries. Empty values never match.
    pub fn compare(
        &self,
        edited: &AddressEntry,
        other: &AddressEntry,
        other_index: usize,
    ) -> Vec<DuplicateWarning> {
        self.identity_fields
            .iter()
            .filter_map(|&field| {
                let value = edited.get(field);
                (!value.is_empty() && value == other.get(field))
                    .then(|| DuplicateWarning::new(field, value, other_index))
            })
            .collect()
    }
}
