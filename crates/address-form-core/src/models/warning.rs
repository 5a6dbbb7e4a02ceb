//! Duplicate warning model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entry::AddressField;

/// A conflict between the edited entry and another entry in the collection.
///
/// Advisory only. Recomputed on every edit and dropped on add/remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateWarning {
    /// Identity field whose values collide
    pub field: AddressField,
    /// The shared value
    pub value: String,
    /// Position of the other entry at detection time
    pub other_index: usize,
}

impl DuplicateWarning {
    pub fn new(field: AddressField, value: impl Into<String>, other_index: usize) -> Self {
        Self {
            field,
            value: value.into(),
            other_index,
        }
    }

    /// Banner text for this warning.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DuplicateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duplicate {} found: {}", self.field.label(), self.value)
    }
}
