//! Inline error strings for one form panel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::AddressField;

/// Error messages currently shown under a panel's inputs.
///
/// Owned by whichever panel edits an entry; not part of the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<AddressField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest result for a field. `None` clears it.
    pub fn set(&mut self, field: AddressField, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn get(&self, field: AddressField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_and_clears() {
        let mut errors = FieldErrors::new();
        errors.set(AddressField::Mobile, Some("bad".into()));
        errors.set(AddressField::Mobile, Some("worse".into()));
        assert_eq!(errors.get(AddressField::Mobile), Some("worse"));
        assert_eq!(errors.len(), 1);

        errors.set(AddressField::Mobile, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_iter_in_form_order() {
        let mut errors = FieldErrors::new();
        errors.set(AddressField::Mobile, Some("m".into()));
        errors.set(AddressField::Pincode, Some("p".into()));

        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![AddressField::Pincode, AddressField::Mobile]);

        errors.clear();
        assert_eq!(errors.iter().count(), 0);
    }
}
