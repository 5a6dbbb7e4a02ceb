//! Form session: turns UI events into collection updates.
//!
//! Flow for an edit: validate the field → record the panel's inline error →
//! store the new value (valid or not) → recompute duplicate warnings.

mod view;

pub use view::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collection::{CollectionManager, CollectionResult};
use crate::models::{AddressEntry, AddressField, DuplicateWarning, EntryId};
use crate::settings::FormSettings;
use crate::validation::{EntryValidator, FieldErrors};

/// An input event from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormEvent {
    /// A field's text changed
    Edit {
        index: usize,
        field: AddressField,
        value: String,
    },
    /// "Add Another Address"
    Add,
    /// "Remove" on a panel
    Remove { index: usize },
    /// "Clear" on a panel
    Reset { index: usize },
}

/// One user's editing session over the address collection.
#[derive(Debug, Clone)]
pub struct FormSession {
    collection: CollectionManager,
    validator: EntryValidator,
    /// Inline errors per panel, keyed by slot id
    panel_errors: HashMap<EntryId, FieldErrors>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// Create a session with default settings and one blank entry.
    pub fn new() -> Self {
        Self::with_settings(&FormSettings::default())
    }

    pub fn with_settings(settings: &FormSettings) -> Self {
        Self {
            collection: CollectionManager::from_settings(settings),
            validator: EntryValidator::from_settings(settings),
            panel_errors: HashMap::new(),
        }
    }

    pub fn collection(&self) -> &CollectionManager {
        &self.collection
    }

    pub fn validator(&self) -> &EntryValidator {
        &self.validator
    }

    pub fn warnings(&self) -> &[DuplicateWarning] {
        self.collection.warnings()
    }

    /// Inline errors for the panel at `index` (empty if it has none).
    pub fn errors_at(&self, index: usize) -> CollectionResult<FieldErrors> {
        let id = self.collection.id_at(index)?;
        Ok(self.panel_errors.get(&id).cloned().unwrap_or_default())
    }

    /// Apply one field change from a panel.
    ///
    /// Returns the field's inline error, if any. The value is stored either way.
    pub fn handle_change(
        &mut self,
        index: usize,
        field: AddressField,
        value: &str,
    ) -> CollectionResult<Option<String>> {
        let id = self.collection.id_at(index)?;
        let updated = self.collection.entry(index)?.with_field(field, value);
        let error = self.validator.validate_field(field, value);

        self.collection.update_entry(index, updated)?;

        let errors = self.panel_errors.entry(id).or_default();
        errors.set(field, error.clone());
        if errors.is_empty() {
            self.panel_errors.remove(&id);
        }

        debug!(index, %field, valid = error.is_none(), "Field changed");
        Ok(error)
    }

    /// Replace a whole entry, revalidating every field of its panel.
    pub fn update_entry(
        &mut self,
        index: usize,
        entry: AddressEntry,
    ) -> CollectionResult<&[DuplicateWarning]> {
        let id = self.collection.id_at(index)?;
        let errors = self.validator.validate_entry(&entry);
        if errors.is_empty() {
            self.panel_errors.remove(&id);
        } else {
            self.panel_errors.insert(id, errors);
        }
        self.collection.update_entry(index, entry)
    }

    pub fn add_entry(&mut self) -> EntryId {
        self.collection.add_entry()
    }

    /// Remove a panel along with its inline errors.
    pub fn remove_entry(&mut self, index: usize) -> CollectionResult<()> {
        let id = self.collection.id_at(index)?;
        self.collection.remove_entry(index)?;
        self.panel_errors.remove(&id);
        Ok(())
    }

    /// Clear a panel's contents and errors. The panel stays in place.
    pub fn reset_entry(&mut self, index: usize) -> CollectionResult<()> {
        let id = self.collection.id_at(index)?;
        self.collection
            .update_entry(index, EntryValidator::reset_entry())?;
        self.panel_errors.remove(&id);

        debug!(index, "Entry reset");
        Ok(())
    }

    pub fn dismiss_warnings(&mut self) {
        self.collection.dismiss_warnings();
    }

    /// Dispatch a UI event.
    pub fn apply(&mut self, event: FormEvent) -> CollectionResult<()> {
        match event {
            FormEvent::Edit {
                index,
                field,
                value,
            } => self.handle_change(index, field, &value).map(|_| ()),
            FormEvent::Add => {
                self.add_entry();
                Ok(())
            }
            FormEvent::Remove { index } => self.remove_entry(index),
            FormEvent::Reset { index } => self.reset_entry(index),
        }
    }

    /// Build what the rendering layer needs to redraw.
    pub fn view(&self) -> FormView {
        let show_remove = self.collection.can_remove();
        let panels = self
            .collection
            .slots()
            .iter()
            .map(|slot| PanelView {
                id: slot.id,
                entry: slot.entry.clone(),
                errors: self.panel_errors.get(&slot.id).cloned().unwrap_or_default(),
                show_remove,
            })
            .collect();

        FormView {
            panels,
            warnings: self.warnings().iter().map(DuplicateWarning::message).collect(),
            show_address_list: self.collection.has_displayable_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionError;
    use crate::validation::INVALID_MOBILE_MESSAGE;

    #[test]
    fn test_invalid_mobile_is_stored() {
        let mut session = FormSession::new();
        let error = session
            .handle_change(0, AddressField::Mobile, "12345")
            .unwrap();

        assert_eq!(error.as_deref(), Some(INVALID_MOBILE_MESSAGE));
        assert_eq!(session.collection().entry(0).unwrap().mobile, "12345");
        assert_eq!(
            session.errors_at(0).unwrap().get(AddressField::Mobile),
            Some(INVALID_MOBILE_MESSAGE)
        );
    }

    #[test]
    fn test_fixing_mobile_clears_error() {
        let mut session = FormSession::new();
        session.handle_change(0, AddressField::Mobile, "12345").unwrap();
        let error = session
            .handle_change(0, AddressField::Mobile, "9876543210")
            .unwrap();

        assert!(error.is_none());
        assert!(session.errors_at(0).unwrap().is_empty());
    }

    #[test]
    fn test_errors_follow_panel_after_removal() {
        let mut session = FormSession::new();
        session.add_entry();
        session.handle_change(1, AddressField::Mobile, "12").unwrap();

        session.remove_entry(0).unwrap();
        assert!(session.errors_at(0).unwrap().get(AddressField::Mobile).is_some());
    }

    #[test]
    fn test_removed_panel_errors_are_dropped() {
        let mut session = FormSession::new();
        session.add_entry();
        session.handle_change(0, AddressField::Mobile, "12").unwrap();

        session.remove_entry(0).unwrap();
        assert!(session.errors_at(0).unwrap().is_empty());
    }

    #[test]
    fn test_reset_clears_entry_and_errors() {
        let mut session = FormSession::new();
        session.add_entry();
        session.handle_change(1, AddressField::City, "Pune").unwrap();
        session.handle_change(1, AddressField::Mobile, "12").unwrap();

        session.reset_entry(1).unwrap();

        assert_eq!(session.collection().len(), 2);
        assert!(session.collection().entry(1).unwrap().is_blank());
        assert!(session.errors_at(1).unwrap().is_empty());
    }

    #[test]
    fn test_update_entry_revalidates_panel() {
        let mut session = FormSession::new();
        let entry = AddressEntry::blank().with_field(AddressField::Mobile, "123");

        let warnings = session.update_entry(0, entry).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(session.errors_at(0).unwrap().len(), 1);

        session.update_entry(0, AddressEntry::blank()).unwrap();
        assert!(session.errors_at(0).unwrap().is_empty());
    }

    #[test]
    fn test_apply_events() {
        let mut session = FormSession::new();
        let events = vec![
            FormEvent::Add,
            FormEvent::Edit {
                index: 0,
                field: AddressField::DoctorName,
                value: "Dr. Rao".into(),
            },
            FormEvent::Edit {
                index: 1,
                field: AddressField::DoctorName,
                value: "Dr. Rao".into(),
            },
        ];
        for event in events {
            session.apply(event).unwrap();
        }
        assert_eq!(session.warnings().len(), 1);

        session.apply(FormEvent::Remove { index: 0 }).unwrap();
        assert!(session.warnings().is_empty());

        assert_eq!(
            session.apply(FormEvent::Remove { index: 0 }),
            Err(CollectionError::CollectionMinSizeViolation)
        );
        assert_eq!(
            session.apply(FormEvent::Reset { index: 3 }),
            Err(CollectionError::InvalidIndex { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event: FormEvent = serde_json::from_str(
            r#"{"type": "edit", "index": 0, "field": "mobile", "value": "98"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            FormEvent::Edit {
                index: 0,
                field: AddressField::Mobile,
                value: "98".into()
            }
        );

        let event: FormEvent = serde_json::from_str(r#"{"type": "add"}"#).unwrap();
        assert_eq!(event, FormEvent::Add);
    }

    #[test]
    fn test_view() {
        let mut session = FormSession::new();
        let view = session.view();
        assert_eq!(view.panels.len(), 1);
        assert!(!view.panels[0].show_remove);
        assert!(!view.show_address_list);
        assert!(view.warnings.is_empty());

        session.add_entry();
        session.handle_change(0, AddressField::Mobile, "9876543210").unwrap();
        session.handle_change(1, AddressField::Mobile, "9876543210").unwrap();

        let view = session.view();
        assert!(view.panels.iter().all(|p| p.show_remove));
        assert!(view.show_address_list);
        assert_eq!(
            view.warnings,
            vec!["Duplicate Mobile Number found: 9876543210".to_string()]
        );
    }

    #[test]
    fn test_settings_flow_through() {
        let settings = FormSettings {
            identity_fields: vec![AddressField::City],
            pincode_digits: Some(6),
        };
        let mut session = FormSession::with_settings(&settings);
        session.add_entry();

        let error = session.handle_change(0, AddressField::Pincode, "41").unwrap();
        assert!(error.is_some());

        session.handle_change(0, AddressField::City, "Pune").unwrap();
        session.handle_change(1, AddressField::City, "Pune").unwrap();
        assert_eq!(session.warnings().len(), 1);
        assert_eq!(session.warnings()[0].field, AddressField::City);
    }
}
