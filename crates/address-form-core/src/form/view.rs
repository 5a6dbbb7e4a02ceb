//! Render-ready views of a form session.

use serde::Serialize;

use crate::models::{AddressEntry, EntryId};
use crate::validation::FieldErrors;

/// What one form panel needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub id: EntryId,
    pub entry: AddressEntry,
    /// Inline messages under the panel's inputs
    pub errors: FieldErrors,
    pub show_remove: bool,
}

/// Everything the rendering layer draws for the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub panels: Vec<PanelView>,
    /// Banner lines, one per duplicate warning
    pub warnings: Vec<String>,
    /// Whether to show the formatted address list
    pub show_address_list: bool,
}
