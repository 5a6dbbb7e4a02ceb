//! Entry validation.
//!
//! Validation is advisory: a failing value yields a message for inline
//! display and is still stored in the collection.

mod field_errors;
mod rules;

pub use field_errors::*;
pub use rules::*;

use std::collections::HashMap;

use crate::models::{AddressEntry, AddressField};
use crate::settings::FormSettings;

/// Stateless per-field validator with an extensible rule table.
#[derive(Debug, Clone)]
pub struct EntryValidator {
    rules: HashMap<AddressField, Vec<FieldRule>>,
}

impl Default for EntryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryValidator {
    /// Create a validator with the default rules.
    pub fn new() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }

    /// Create a validator with the default rules plus any opted into by settings.
    pub fn from_settings(settings: &FormSettings) -> Self {
        let mut validator = Self::new();
        if let Some(digits) = settings.pincode_digits {
            validator.add_rule(AddressField::Pincode, FieldRule::Digits(digits));
        }
        validator
    }

    /// Check one field's new value. Returns the first failing rule's message.
    pub fn validate_field(&self, field: AddressField, value: &str) -> Option<String> {
        self.rules
            .get(&field)?
            .iter()
            .find_map(|rule| rule.check(field, value))
    }

    /// Run every rule over a whole entry.
    pub fn validate_entry(&self, entry: &AddressEntry) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in AddressField::ALL {
            errors.set(field, self.validate_field(field, entry.get(field)));
        }
        errors
    }

    /// Register an additional rule for a field.
    pub fn add_rule(&mut self, field: AddressField, rule: FieldRule) {
        self.rules.entry(field).or_default().push(rule);
    }

    /// Fresh contents for a panel the user clears.
    pub fn reset_entry() -> AddressEntry {
        AddressEntry::blank()
    }

    fn default_rules() -> HashMap<AddressField, Vec<FieldRule>> {
        let mut map = HashMap::new();
        map.insert(AddressField::Mobile, vec![FieldRule::TenDigitMobile]);
        map
    }
}

/// Check a field against the default rules.
pub fn validate_field(field: AddressField, value: &str) -> Option<String> {
    EntryValidator::new().validate_field(field, value)
}
