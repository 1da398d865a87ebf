//! # Overlay Storage
//!
//! User edits never touch the static dataset. They live in an overlay made of
//! two independent slots:
//!
//! - **edits**: the ordered sequence of user-authored or edited note records
//! - **deleted**: the ids of static notes the user removed
//!
//! The [`OverlayStore`] trait hides where those slots live:
//!
//! - [`fs::FileStore`]: one JSON file per slot in a directory
//! - [`memory::InMemoryStore`]: raw strings in memory, for tests
//!
//! ## Malformed Slots
//!
//! A slot that is absent is an empty collection. A slot whose content does
//! not parse is *also* an empty collection: the problem is logged and reading
//! continues, so one corrupt slot cannot take the whole notes view down.
//! Genuine I/O failures (permissions, disk) are still errors.
//!
//! ```text
//! <store dir>/
//! ├── custom_notes.json   # edits slot (JSON array of notes)
//! └── deleted_notes.json  # deleted slot (JSON array of ids)
//! ```

use crate::error::Result;
use crate::model::{NoteId, RawNote};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

/// The two overlay slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Edits,
    Deleted,
}

impl Slot {
    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::Edits => "custom_notes.json",
            Slot::Deleted => "deleted_notes.json",
        }
    }
}

/// Abstract interface for the overlay slots.
pub trait OverlayStore {
    /// Load the edited/created note records in stored order.
    fn load_edits(&self) -> Result<Vec<RawNote>>;

    /// Replace the edits slot.
    fn save_edits(&mut self, edits: &[RawNote]) -> Result<()>;

    /// Load the ids of deleted static notes.
    fn load_deleted(&self) -> Result<Vec<NoteId>>;

    /// Replace the deleted slot.
    fn save_deleted(&mut self, ids: &[NoteId]) -> Result<()>;
}

/// Parse raw slot text, treating absence and malformed content as empty.
pub(crate) fn decode_slot<T: DeserializeOwned>(slot: Slot, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                slot = slot.file_name(),
                error = %e,
                "ignoring malformed overlay slot"
            );
            Vec::new()
        }
    }
}

pub(crate) fn encode_slot<T: Serialize>(items: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_blank_slots_are_empty() {
        let ids: Vec<NoteId> = decode_slot(Slot::Deleted, None);
        assert!(ids.is_empty());
        let ids: Vec<NoteId> = decode_slot(Slot::Deleted, Some("  "));
        assert!(ids.is_empty());
    }

    #[test]
    fn malformed_slot_is_empty() {
        let notes: Vec<RawNote> = decode_slot(Slot::Edits, Some("[{\"id\": 1,"));
        assert!(notes.is_empty());
        let ids: Vec<NoteId> = decode_slot(Slot::Deleted, Some("{\"not\": \"a list\"}"));
        assert!(ids.is_empty());
    }

    #[test]
    fn well_formed_slot_decodes() {
        let ids: Vec<NoteId> = decode_slot(Slot::Deleted, Some("[3, 1]"));
        assert_eq!(ids, vec![3, 1]);
    }
}
