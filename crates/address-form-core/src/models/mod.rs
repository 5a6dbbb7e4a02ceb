//! Domain models for the address form.

mod entry;
mod warning;

pub use entry::*;
pub use warning::*;
