//! Form settings supplied by the host application.
//!
//! The core reads no files or environment variables. Hosts build settings
//! in code or pass a JSON document; missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AddressField;

/// Settings errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Tunables for duplicate detection and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSettings {
    /// Fields compared across entries, in warning order
    pub identity_fields: Vec<AddressField>,
    /// Require a pincode of exactly this many digits (off by default)
    pub pincode_digits: Option<usize>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            identity_fields: vec![
                AddressField::DoctorName,
                AddressField::Mobile,
                AddressField::HospitalClinic,
            ],
            pincode_digits: None,
        }
    }
}

impl FormSettings {
    /// Parse settings from JSON and check them.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: FormSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check settings for values the form can't work with.
    pub fn validate(&self) -> SettingsResult<()> {
        for (i, field) in self.identity_fields.iter().enumerate() {
            if self.identity_fields[..i].contains(field) {
                return Err(SettingsError::InvalidValue {
                    key: "identityFields".into(),
                    reason: format!("{} listed more than once", field),
                });
            }
        }

        if self.pincode_digits == Some(0) {
            return Err(SettingsError::InvalidValue {
                key: "pincodeDigits".into(),
                reason: "Must be greater than zero".into(),
            });
        }

        Ok(())
    }
}
