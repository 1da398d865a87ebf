//! Per-id overlay status.
//!
//! The edits slot and the deleted slot interact: saving a note un-deletes it,
//! deleting a note drops its edit. [`Overlay`] reads both slots once and
//! exposes that interaction as a single status per id:
//!
//! ```text
//!  Unmodified ──save──▶ Edited ◀──save── Deleted
//!       │                 │                 ▲
//!       └──────delete─────┴──── delete ─────┘   (static ids)
//!                         └──── delete ───▶ gone (overlay-only ids)
//! ```
//!
//! An id with an edit is `Edited` even if a stale deletion entry exists for
//! it: a save always wins over an earlier deletion.
//!
//! [`crate::notes::merge`] resolves every static record through this status,
//! and [`crate::notes::NoteService::raw_note`] uses it to find the record to
//! edit.

use crate::error::Result;
use crate::model::{NoteId, RawNote};
use crate::store::OverlayStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteStatus<'a> {
    Unmodified,
    Edited(&'a RawNote),
    Deleted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    edits: Vec<RawNote>,
    deleted: Vec<NoteId>,
}

impl Overlay {
    pub fn load<S: OverlayStore>(store: &S) -> Result<Self> {
        Ok(Self {
            edits: store.load_edits()?,
            deleted: store.load_deleted()?,
        })
    }

    pub fn persist<S: OverlayStore>(&self, store: &mut S) -> Result<()> {
        store.save_edits(&self.edits)?;
        store.save_deleted(&self.deleted)?;
        Ok(())
    }

    pub fn edits(&self) -> &[RawNote] {
        &self.edits
    }

    pub fn deleted(&self) -> &[NoteId] {
        &self.deleted
    }

    pub fn is_deleted(&self, id: NoteId) -> bool {
        self.deleted.contains(&id)
    }

    pub fn status(&self, id: NoteId) -> NoteStatus<'_> {
        if let Some(edit) = self.edits.iter().find(|n| n.id == id) {
            NoteStatus::Edited(edit)
        } else if self.is_deleted(id) {
            NoteStatus::Deleted
        } else {
            NoteStatus::Unmodified
        }
    }

    /// Record an edit. Replaces an existing edit in place (keeping its
    /// position) or appends, and clears any deletion of the same id.
    pub fn save(&mut self, note: RawNote) {
        let id = note.id;
        match self.edits.iter_mut().find(|n| n.id == id) {
            Some(existing) => *existing = note,
            None => self.edits.push(note),
        }
        self.deleted.retain(|d| *d != id);
    }

    /// Record a deletion. Static ids are remembered so the static record stays
    /// hidden; overlay-only ids simply vanish.
    pub fn delete(&mut self, id: NoteId, is_static: bool) {
        self.edits.retain(|n| n.id != id);
        if is_static && !self.is_deleted(id) {
            self.deleted.push(id);
        }
    }
}
