//! Address-Form Core Library
//!
//! State for a form that collects several postal addresses at once, with
//! cross-entry duplicate detection and per-field validation.
//!
//! # Architecture
//!
//! ```text
//!   UI edit event (index, field, value)
//!                 │
//!                 ▼
//!          Entry Validator ──────────► inline field error (advisory)
//!                 │
//!                 ▼
//!         Collection Manager
//!        replace entry in place
//!                 │
//!                 ▼
//!   Duplicate detection: edited entry vs. every other entry
//!                 │
//!     ┌───────────┼────────────────────────┐
//!     ▼           ▼                        ▼
//!  Form panels  Warning banner   Formatted address list
//! ```
//!
//! # Core Principle
//!
//! **Nothing the user types is rejected.** Validation failures and
//! duplicates are surfaced as messages; only out-of-range indices and
//! removing the last entry are errors.
//!
//! # Modules
//!
//! - [`models`]: Domain types (AddressEntry, AddressField, DuplicateWarning)
//! - [`validation`]: Per-field rules and inline error state
//! - [`collection`]: Ordered entry list and duplicate detection
//! - [`form`]: Event handling and render views for one editing session
//! - [`settings`]: Host-supplied tunables

pub mod collection;
pub mod form;
pub mod models;
pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use collection::{
    CollectionError, CollectionManager, CollectionResult, CollectionSnapshot, DuplicateDetector,
    EntrySlot,
};
pub use form::{FormEvent, FormSession, FormView, PanelView};
pub use models::{AddressEntry, AddressField, DuplicateWarning, EntryId, FieldParseError};
pub use settings::{FormSettings, SettingsError};
pub use validation::{EntryValidator, FieldErrors, FieldRule, INVALID_MOBILE_MESSAGE};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AddressFormError {
    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Collection size violation: {0}")]
    CollectionMinSizeViolation(String),

    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CollectionError> for AddressFormError {
    fn from(e: CollectionError) -> Self {
        match e {
            CollectionError::InvalidIndex { .. } => AddressFormError::InvalidIndex(e.to_string()),
            CollectionError::CollectionMinSizeViolation => {
                AddressFormError::CollectionMinSizeViolation(e.to_string())
            }
            CollectionError::UnknownEntry(_) => AddressFormError::UnknownEntry(e.to_string()),
        }
    }
}

impl From<FieldParseError> for AddressFormError {
    fn from(e: FieldParseError) -> Self {
        AddressFormError::InvalidInput(e.to_string())
    }
}

impl From<SettingsError> for AddressFormError {
    fn from(e: SettingsError) -> Self {
        AddressFormError::SettingsError(e.to_string())
    }
}

impl From<serde_json::Error> for AddressFormError {
    fn from(e: serde_json::Error) -> Self {
        AddressFormError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AddressFormError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AddressFormError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a stderr log subscriber.
///
/// `RUST_LOG` wins over `filter`; with neither set only warnings are shown.
/// Calling this again is a no-op.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let fallback = filter.unwrap_or_else(|| "warn".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        info!("Address form logging initialized");
    }
}

/// Start a form session with one blank entry.
#[uniffi::export]
pub fn new_form_session() -> Arc<AddressFormCore> {
    Arc::new(AddressFormCore {
        session: Mutex::new(FormSession::new()),
    })
}

/// Start a form session configured by a JSON settings document.
#[uniffi::export]
pub fn new_form_session_with_settings(
    settings_json: String,
) -> Result<Arc<AddressFormCore>, AddressFormError> {
    let settings = FormSettings::from_json(&settings_json)?;
    Ok(Arc::new(AddressFormCore {
        session: Mutex::new(FormSession::with_settings(&settings)),
    }))
}

/// Check one field's value against the default rules.
///
/// Returns the inline error message, or `None` if the value is acceptable.
#[uniffi::export]
pub fn validate_field(field: String, value: String) -> Result<Option<String>, AddressFormError> {
    let field: AddressField = field.parse()?;
    Ok(validation::validate_field(field, &value))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe form session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct AddressFormCore {
    session: Mutex<FormSession>,
}

#[uniffi::export]
impl AddressFormCore {
    // =========================================================================
    // Entry Operations
    // =========================================================================

    /// Append a blank entry. Returns its id.
    pub fn add_entry(&self) -> Result<String, AddressFormError> {
        let mut session = self.session.lock()?;
        Ok(session.add_entry().to_string())
    }

    /// Remove the entry at `index`.
    pub fn remove_entry(&self, index: u32) -> Result<(), AddressFormError> {
        let mut session = self.session.lock()?;
        session.remove_entry(index as usize)?;
        Ok(())
    }

    /// Replace a whole entry. Returns the resulting warning messages.
    pub fn update_entry(
        &self,
        index: u32,
        entry: FfiAddressEntry,
    ) -> Result<Vec<String>, AddressFormError> {
        let mut session = self.session.lock()?;
        let warnings = session.update_entry(index as usize, entry.into())?;
        Ok(warnings.iter().map(DuplicateWarning::message).collect())
    }

    /// Apply one field edit. Returns the field's inline error, if any.
    pub fn handle_change(
        &self,
        index: u32,
        field: String,
        value: String,
    ) -> Result<Option<String>, AddressFormError> {
        let field: AddressField = field.parse()?;
        let mut session = self.session.lock()?;
        Ok(session.handle_change(index as usize, field, &value)?)
    }

    /// Clear the entry at `index` without removing it.
    pub fn reset_entry(&self, index: u32) -> Result<(), AddressFormError> {
        let mut session = self.session.lock()?;
        session.reset_entry(index as usize)?;
        Ok(())
    }

    /// Hide the duplicate banner.
    pub fn dismiss_warnings(&self) -> Result<(), AddressFormError> {
        let mut session = self.session.lock()?;
        session.dismiss_warnings();
        Ok(())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    pub fn entries(&self) -> Result<Vec<FfiAddressEntry>, AddressFormError> {
        let session = self.session.lock()?;
        Ok(session.collection().entries().cloned().map(Into::into).collect())
    }

    pub fn warnings(&self) -> Result<Vec<String>, AddressFormError> {
        let session = self.session.lock()?;
        Ok(session.warnings().iter().map(DuplicateWarning::message).collect())
    }

    /// Everything needed to redraw the form.
    pub fn view(&self) -> Result<FfiFormView, AddressFormError> {
        let session = self.session.lock()?;
        Ok(session.view().into())
    }

    /// Export the entries as JSON for the formatted address list.
    pub fn export_json(&self) -> Result<String, AddressFormError> {
        let session = self.session.lock()?;
        Ok(session.collection().to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe address entry.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAddressEntry {
    pub doctor_name: String,
    pub hospital_clinic: String,
    pub flat_no: String,
    pub society: String,
    pub area: String,
    pub city: String,
    pub pincode: String,
    pub mobile: String,
}

impl From<AddressEntry> for FfiAddressEntry {
    fn from(entry: AddressEntry) -> Self {
        Self {
            doctor_name: entry.doctor_name,
            hospital_clinic: entry.hospital_clinic,
            flat_no: entry.flat_no,
            society: entry.society,
            area: entry.area,
            city: entry.city,
            pincode: entry.pincode,
            mobile: entry.mobile,
        }
    }
}

impl From<FfiAddressEntry> for AddressEntry {
    fn from(entry: FfiAddressEntry) -> Self {
        AddressEntry {
            doctor_name: entry.doctor_name,
            hospital_clinic: entry.hospital_clinic,
            flat_no: entry.flat_no,
            society: entry.society,
            area: entry.area,
            city: entry.city,
            pincode: entry.pincode,
            mobile: entry.mobile,
        }
    }
}

/// FFI-safe form panel.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPanelView {
    pub id: String,
    pub entry: FfiAddressEntry,
    /// Field wire name → inline error message
    pub errors: HashMap<String, String>,
    pub show_remove: bool,
}

impl From<PanelView> for FfiPanelView {
    fn from(panel: PanelView) -> Self {
        Self {
            id: panel.id.to_string(),
            errors: panel
                .errors
                .iter()
                .map(|(field, message)| (field.name().to_string(), message.to_string()))
                .collect(),
            entry: panel.entry.into(),
            show_remove: panel.show_remove,
        }
    }
}

/// FFI-safe form view.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFormView {
    pub panels: Vec<FfiPanelView>,
    pub warnings: Vec<String>,
    pub show_address_list: bool,
}

impl From<FormView> for FfiFormView {
    fn from(view: FormView) -> Self {
        Self {
            panels: view.panels.into_iter().map(Into::into).collect(),
            warnings: view.warnings,
            show_address_list: view.show_address_list,
        }
    }
}
