//! Collection manager for the entries on the form.
//!
//! Owns the ordered entry list and the current duplicate warnings. Every
//! successful operation swaps in fresh `Arc` snapshots, so an observer
//! holding an older snapshot can detect change with [`Arc::ptr_eq`].

mod duplicates;

pub use duplicates::*;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{AddressEntry, DuplicateWarning, EntryId};
use crate::settings::FormSettings;

/// Collection errors. All of them are caller-contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Invalid index {index} for collection of {len} entries")]
    InvalidIndex { index: usize, len: usize },

    #[error("Cannot remove the last remaining entry")]
    CollectionMinSizeViolation,

    #[error("No entry with id {0}")]
    UnknownEntry(EntryId),
}

pub type CollectionResult<T> = Result<T, CollectionError>;

/// An entry together with the id of the slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySlot {
    pub id: EntryId,
    pub entry: AddressEntry,
}

impl EntrySlot {
    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            entry: AddressEntry::blank(),
        }
    }
}

/// Immutable view of the collection at one point in time.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    pub slots: Arc<Vec<EntrySlot>>,
    pub warnings: Arc<Vec<DuplicateWarning>>,
}

/// Authoritative list of address entries. Never empty.
#[derive(Debug, Clone)]
pub struct CollectionManager {
    slots: Arc<Vec<EntrySlot>>,
    warnings: Arc<Vec<DuplicateWarning>>,
    detector: DuplicateDetector,
}

impl Default for CollectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::len_without_is_empty)]
impl CollectionManager {
    /// Create a collection holding one blank entry.
    pub fn new() -> Self {
        Self::with_detector(DuplicateDetector::new())
    }

    pub fn from_settings(settings: &FormSettings) -> Self {
        Self::with_detector(DuplicateDetector::from_settings(settings))
    }

    pub fn with_detector(detector: DuplicateDetector) -> Self {
        Self {
            slots: Arc::new(vec![EntrySlot::blank()]),
            warnings: Arc::new(Vec::new()),
            detector,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of entries (always at least one).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[EntrySlot] {
        &self.slots
    }

    /// Entries in collection order.
    pub fn entries(&self) -> impl Iterator<Item = &AddressEntry> + Clone {
        self.slots.iter().map(|slot| &slot.entry)
    }

    pub fn entry(&self, index: usize) -> CollectionResult<&AddressEntry> {
        Ok(&self.slot(index)?.entry)
    }

    pub fn id_at(&self, index: usize) -> CollectionResult<EntryId> {
        Ok(self.slot(index)?.id)
    }

    /// Current position of a slot, if it is still in the collection.
    pub fn index_of(&self, id: EntryId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Warnings from the most recent edit.
    pub fn warnings(&self) -> &[DuplicateWarning] {
        &self.warnings
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            slots: Arc::clone(&self.slots),
            warnings: Arc::clone(&self.warnings),
        }
    }

    /// Whether the form should offer a remove button.
    pub fn can_remove(&self) -> bool {
        self.slots.len() > 1
    }

    /// Whether the formatted address list should be shown.
    pub fn has_displayable_entries(&self) -> bool {
        self.entries().any(AddressEntry::is_displayable)
    }

    /// Read-only copy for the formatted address list, when it should be shown.
    pub fn displayable_copy(&self) -> Option<Vec<AddressEntry>> {
        self.has_displayable_entries()
            .then(|| self.entries().cloned().collect())
    }

    /// Serialize the entries (without ids) for downstream formatting.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<&AddressEntry> = self.entries().collect();
        serde_json::to_string_pretty(&entries)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Append a blank entry and drop the current warnings.
    pub fn add_entry(&mut self) -> EntryId {
        let slot = EntrySlot::blank();
        let id = slot.id;

        let mut slots = Vec::with_capacity(self.slots.len() + 1);
        slots.extend(self.slots.iter().cloned());
        slots.push(slot);

        self.slots = Arc::new(slots);
        self.warnings = Arc::new(Vec::new());

        debug!(entry_id = %id, len = self.slots.len(), "Entry added");
        id
    }

    /// Remove the entry at `index`, shifting later entries down.
    ///
    /// Fails rather than empty the collection. Drops the current warnings.
    pub fn remove_entry(&mut self, index: usize) -> CollectionResult<AddressEntry> {
        self.check_index(index)?;
        if !self.can_remove() {
            warn!(index, "Refusing to remove the last remaining entry");
            return Err(CollectionError::CollectionMinSizeViolation);
        }

        let mut slots: Vec<EntrySlot> = self.slots.as_ref().clone();
        let removed = slots.remove(index);

        self.slots = Arc::new(slots);
        self.warnings = Arc::new(Vec::new());

        debug!(index, entry_id = %removed.id, len = self.slots.len(), "Entry removed");
        Ok(removed.entry)
    }

    pub fn remove_entry_by_id(&mut self, id: EntryId) -> CollectionResult<AddressEntry> {
        let index = self.index_of(id).ok_or(CollectionError::UnknownEntry(id))?;
        self.remove_entry(index)
    }

    /// Replace the entry at `index` and recompute its duplicate warnings.
    ///
    /// Warnings never block the update.
    pub fn update_entry(
        &mut self,
        index: usize,
        entry: AddressEntry,
    ) -> CollectionResult<&[DuplicateWarning]> {
        self.check_index(index)?;

        let slots: Vec<EntrySlot> = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                if i == index {
                    EntrySlot {
                        id: slot.id,
                        entry: entry.clone(),
                    }
                } else {
                    slot.clone()
                }
            })
            .collect();

        let warnings = self
            .detector
            .detect(index, slots.iter().map(|slot| &slot.entry));

        debug!(index, entry_id = %slots[index].id, "Entry updated");
        if !warnings.is_empty() {
            info!(index, count = warnings.len(), "Duplicate entries detected");
        }

        self.slots = Arc::new(slots);
        self.warnings = Arc::new(warnings);
        Ok(self.warnings.as_slice())
    }

    pub fn update_entry_by_id(
        &mut self,
        id: EntryId,
        entry: AddressEntry,
    ) -> CollectionResult<&[DuplicateWarning]> {
        let index = self.index_of(id).ok_or(CollectionError::UnknownEntry(id))?;
        self.update_entry(index, entry)
    }

    /// Clear the warning banner without touching entries.
    pub fn dismiss_warnings(&mut self) {
        if !self.warnings.is_empty() {
            self.warnings = Arc::new(Vec::new());
        }
    }

    fn slot(&self, index: usize) -> CollectionResult<&EntrySlot> {
        self.slots.get(index).ok_or(CollectionError::InvalidIndex {
            index,
            len: self.slots.len(),
        })
    }

    fn check_index(&self, index: usize) -> CollectionResult<()> {
        if index >= self.slots.len() {
            warn!(index, len = self.slots.len(), "Entry index out of range");
            return Err(CollectionError::InvalidIndex {
                index,
                len: self.slots.len(),
            });
        }
        Ok(())
    }
}
