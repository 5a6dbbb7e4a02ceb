//! Per-field validation rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::AddressField;

/// Shown under the mobile input when the number is malformed.
pub const INVALID_MOBILE_MESSAGE: &str = "Please enter a valid 10-digit mobile number";

// ASCII digits only; `\d` would also accept other Unicode digits.
static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Failed to compile mobile number regex"));

/// A syntactic check for one field.
///
/// Every rule accepts the empty string; a blank input is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRule {
    /// Exactly 10 decimal digits
    TenDigitMobile,
    /// Exactly `n` decimal digits
    Digits(usize),
    /// At most `n` characters
    MaxLength(usize),
}

impl FieldRule {
    /// Check a value, returning the error message if it fails.
    pub fn check(&self, field: AddressField, value: &str) -> Option<String> {
        if value.is_empty() {
            return None;
        }

        match self {
            FieldRule::TenDigitMobile => {
                if MOBILE_PATTERN.is_match(value) {
                    None
                } else {
                    Some(INVALID_MOBILE_MESSAGE.to_string())
                }
            }
            FieldRule::Digits(n) => {
                let ok = value.len() == *n && value.bytes().all(|b| b.is_ascii_digit());
                if ok {
                    None
                } else {
                    Some(format!(
                        "Please enter a valid {}-digit {}",
                        n,
                        field.label().to_lowercase()
                    ))
                }
            }
            FieldRule::MaxLength(max) => {
                if value.chars().count() <= *max {
                    None
                } else {
                    Some(format!("{} must be at most {} characters", field.label(), max))
                }
            }
        }
    }
}
