use super::{decode_slot, encode_slot, OverlayStore, Slot};
use crate::error::Result;
use crate::model::{NoteId, RawNote};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Slots are kept as raw text so tests can plant corrupt content and observe
/// the fail-soft reads.
#[derive(Default)]
pub struct InMemoryStore {
    slots: HashMap<Slot, String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with arbitrary text.
    pub fn with_raw(mut self, slot: Slot, raw: impl Into<String>) -> Self {
        self.slots.insert(slot, raw.into());
        self
    }

    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Number of slot writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn write(&mut self, slot: Slot, raw: String) {
        self.slots.insert(slot, raw);
        self.writes += 1;
    }
}

impl OverlayStore for InMemoryStore {
    fn load_edits(&self) -> Result<Vec<RawNote>> {
        Ok(decode_slot(Slot::Edits, self.raw(Slot::Edits)))
    }

    fn save_edits(&mut self, edits: &[RawNote]) -> Result<()> {
        let raw = encode_slot(edits)?;
        self.write(Slot::Edits, raw);
        Ok(())
    }

    fn load_deleted(&self) -> Result<Vec<NoteId>> {
        Ok(decode_slot(Slot::Deleted, self.raw(Slot::Deleted)))
    }

    fn save_deleted(&mut self, ids: &[NoteId]) -> Result<()> {
        let raw = encode_slot(ids)?;
        self.write(Slot::Deleted, raw);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::dataset::StaticDataset;

    /// A static dataset plus an overlay store, built up fluently.
    pub struct NotesFixture {
        pub dataset: Vec<RawNote>,
        pub store: InMemoryStore,
    }

    impl Default for NotesFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn note(id: NoteId, title_en: &str, date: &str) -> RawNote {
        RawNote {
            title_en: Some(title_en.to_string()),
            date: Some(date.to_string()),
            ..RawNote::new(id)
        }
    }

    impl NotesFixture {
        pub fn new() -> Self {
            Self {
                dataset: Vec::new(),
                store: InMemoryStore::new(),
            }
        }

        pub fn with_static(mut self, id: NoteId, title_en: &str, date: &str) -> Self {
            self.dataset.push(note(id, title_en, date));
            self
        }

        pub fn with_static_note(mut self, note: RawNote) -> Self {
            self.dataset.push(note);
            self
        }

        pub fn with_edit(mut self, note: RawNote) -> Self {
            let mut edits = self.store.load_edits().unwrap();
            edits.push(note);
            self.store.save_edits(&edits).unwrap();
            self
        }

        pub fn with_deleted(mut self, id: NoteId) -> Self {
            let mut ids = self.store.load_deleted().unwrap();
            ids.push(id);
            self.store.save_deleted(&ids).unwrap();
            self
        }

        pub fn dataset(&self) -> StaticDataset {
            StaticDataset::from_notes(self.dataset.clone())
        }
    }
}
