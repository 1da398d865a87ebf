//! # Note Merge Engine
//!
//! [`NoteService`] produces the single list of notes every reader sees, from
//! two sources of truth:
//!
//! 1. the immutable [`StaticDataset`] bundled at build time
//! 2. the user's [`Overlay`] (edits and deletions) held in an [`OverlayStore`]
//!
//! Merging works per id: static records whose id was deleted are dropped, the
//! remaining ones are normalized, and every overlay record then *replaces* the
//! record with the same id (or is appended). There is no field-level merge: a
//! merged note is either entirely static or entirely overlay.
//!
//! The result is sorted by date, newest first. Ties keep merge order (static
//! order, then overlay additions in stored order); notes whose date does not
//! parse go last.
//!
//! Writes only ever touch the overlay store. Nothing here guards against two
//! processes editing the same store at once: the last write wins.

use crate::dataset::StaticDataset;
use crate::error::Result;
use crate::model::{Note, NoteContent, NoteId, RawNote};
use crate::overlay::{NoteStatus, Overlay};
use crate::slug::slugify;
use crate::store::OverlayStore;
use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;
use std::fmt::Display;

pub struct NoteService<S: OverlayStore> {
    dataset: StaticDataset,
    store: S,
}

impl<S: OverlayStore> NoteService<S> {
    pub fn new(dataset: StaticDataset, store: S) -> Self {
        Self { dataset, store }
    }

    pub fn dataset(&self) -> &StaticDataset {
        &self.dataset
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn overlay(&self) -> Result<Overlay> {
        Overlay::load(&self.store)
    }

    /// The merged, normalized, date-sorted view.
    pub fn get_notes(&self) -> Result<Vec<Note>> {
        let overlay = self.overlay()?;
        Ok(merge(&self.dataset, &overlay))
    }

    /// Store a created or edited note in the overlay.
    ///
    /// `slug` is re-derived from the English title (`title_en || title`); the
    /// incoming slug only survives when nothing is derivable. The unified
    /// `title` is stored as given: readers get the fallback chain from
    /// [`RawNote::normalize`], so a copied-in Chinese title can never feed a
    /// later slug. Saving a previously deleted id un-deletes it.
    pub fn save_note(&mut self, note: RawNote) -> Result<()> {
        let mut stored = note;

        let derived = slugify(&stored.slug_source());
        if !derived.is_empty() {
            stored.slug = Some(derived);
        }

        let id = stored.id;
        let mut overlay = self.overlay()?;
        overlay.save(stored);
        overlay.persist(&mut self.store)?;
        tracing::debug!(id, "saved note to overlay");
        Ok(())
    }

    /// Remove a note from the merged view. Idempotent.
    pub fn delete_note(&mut self, id: NoteId) -> Result<()> {
        let mut overlay = self.overlay()?;
        overlay.delete(id, self.dataset.contains(id));
        overlay.persist(&mut self.store)?;
        tracing::debug!(id, "deleted note");
        Ok(())
    }

    /// Look a note up by id. Ids are compared by their string form, so `5`
    /// and `"5"` find the same note.
    pub fn get_note_by_id(&self, id: impl Display) -> Result<Option<Note>> {
        let key = id.to_string();
        Ok(self
            .get_notes()?
            .into_iter()
            .find(|n| n.id.to_string() == key))
    }

    pub fn get_note_by_slug(&self, slug: &str) -> Result<Option<Note>> {
        Ok(self.get_notes()?.into_iter().find(|n| n.slug == slug))
    }

    /// The stored record behind a merged note, for editing.
    pub fn raw_note(&self, id: NoteId) -> Result<Option<RawNote>> {
        let overlay = self.overlay()?;
        let raw = match overlay.status(id) {
            NoteStatus::Edited(edit) => Some(edit.clone()),
            NoteStatus::Deleted => None,
            NoteStatus::Unmodified => self.dataset.notes().iter().find(|n| n.id == id).cloned(),
        };
        Ok(raw)
    }

    /// The id to give a newly created note.
    ///
    /// Deleted static ids and overlay ids count too, not just the ids in the
    /// merged view, so a new note never silently revives a deleted one.
    pub fn next_id(&self) -> Result<NoteId> {
        let overlay = self.overlay()?;
        let max = self
            .dataset
            .notes()
            .iter()
            .chain(overlay.edits())
            .map(|n| n.id)
            .fold(0, NoteId::max);
        Ok(max + 1)
    }

    /// Distinct non-empty categories, in merged order.
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for note in self.get_notes()? {
            if !note.category.is_empty() && !categories.contains(&note.category) {
                categories.push(note.category);
            }
        }
        Ok(categories)
    }

    /// Content of an overlay note with this slug, if it carries any inline.
    pub fn local_content(&self, slug: &str) -> Result<Option<NoteContent>> {
        let overlay = self.overlay()?;
        Ok(overlay
            .edits()
            .iter()
            .find(|n| n.has_content() && n.normalize().slug == slug)
            .map(NoteContent::from_raw))
    }
}

/// Compose the static dataset and the overlay into the merged view.
///
/// Static records are resolved through their [`NoteStatus`]; overlay records
/// for ids the dataset does not know are appended in stored order.
pub fn merge(dataset: &StaticDataset, overlay: &Overlay) -> Vec<Note> {
    let mut merged: Vec<Note> = Vec::new();
    let mut positions: HashMap<NoteId, usize> = HashMap::new();

    let statics = dataset
        .notes()
        .iter()
        .filter_map(|raw| match overlay.status(raw.id) {
            NoteStatus::Unmodified => Some(raw),
            NoteStatus::Edited(edit) => Some(edit),
            NoteStatus::Deleted => None,
        });
    let additions = overlay
        .edits()
        .iter()
        .filter(|edit| !dataset.contains(edit.id));

    for raw in statics.chain(additions) {
        let note = raw.normalize();
        match positions.get(&note.id) {
            Some(&pos) => merged[pos] = note,
            None => {
                positions.insert(note.id, merged.len());
                merged.push(note);
            }
        }
    }

    sort_by_date_desc(&mut merged);
    merged
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()))
}

/// Newest first; stable, undated notes last.
pub fn sort_by_date_desc(notes: &mut [Note]) {
    notes.sort_by_key(|n| std::cmp::Reverse(parse_date(&n.date)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{note, NotesFixture};
    use crate::store::memory::InMemoryStore;
    use crate::store::Slot;

    fn service(fixture: NotesFixture) -> NoteService<InMemoryStore> {
        let dataset = fixture.dataset();
        NoteService::new(dataset, fixture.store)
    }

    fn ids(notes: &[Note]) -> Vec<NoteId> {
        notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn empty_overlay_returns_normalized_static_notes() {
        let svc = service(
            NotesFixture::new()
                .with_static(1, "First", "2024-01-01")
                .with_static(2, "Second", "2024-02-01"),
        );
        let notes = svc.get_notes().unwrap();
        assert_eq!(ids(&notes), vec![2, 1]);
        assert_eq!(notes[1].slug, "first");
        assert_eq!(notes[1].title, "First");
    }

    #[test]
    fn sorts_by_date_descending() {
        let svc = service(
            NotesFixture::new()
                .with_static(1, "A", "2024-01-01")
                .with_static(2, "B", "2025-06-01")
                .with_static(3, "C", "2023-12-31"),
        );
        let dates: Vec<_> = svc
            .get_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.date)
            .collect();
        assert_eq!(dates, vec!["2025-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn ties_keep_merge_order_and_undated_go_last() {
        let svc = service(
            NotesFixture::new()
                .with_static(1, "Undated", "someday")
                .with_static(2, "Same A", "2024-05-05")
                .with_static(3, "Same B", "2024-05-05"),
        );
        assert_eq!(ids(&svc.get_notes().unwrap()), vec![2, 3, 1]);
    }

    #[test]
    fn overlay_replaces_static_record_entirely() {
        let edited = RawNote {
            title_en: Some("Rewritten".into()),
            date: Some("2024-01-01".into()),
            ..RawNote::new(1)
        };
        let svc = service(
            NotesFixture::new()
                .with_static_note(RawNote {
                    category: Some("Unreal Engine".into()),
                    ..note(1, "Original", "2024-01-01")
                })
                .with_edit(edited),
        );
        let notes = svc.get_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Rewritten");
        assert_eq!(notes[0].category, "");
    }

    #[test]
    fn delete_then_save_undeletes() {
        let mut svc = service(NotesFixture::new().with_static(1, "Static", "2024-01-01"));

        svc.delete_note(1).unwrap();
        assert!(svc.get_notes().unwrap().is_empty());

        svc.save_note(RawNote {
            content: Some("new body".into()),
            ..note(1, "Static", "2024-01-01")
        })
        .unwrap();
        let notes = svc.get_notes().unwrap();
        assert_eq!(ids(&notes), vec![1]);
        assert_eq!(notes[0].content, "new body");
        assert!(svc.overlay().unwrap().deleted().is_empty());
    }

    #[test]
    fn save_is_idempotent() {
        let mut svc = service(NotesFixture::new());
        let draft = note(3, "Draft", "2024-03-03");

        svc.save_note(draft.clone()).unwrap();
        let first = svc.get_notes().unwrap();
        svc.save_note(draft).unwrap();
        let second = svc.get_notes().unwrap();

        assert_eq!(first, second);
        assert_eq!(svc.overlay().unwrap().edits().len(), 1);
    }

    #[test]
    fn save_recomputes_slug_from_english_title() {
        let mut svc = service(NotesFixture::new());
        svc.save_note(RawNote {
            slug: Some("stale-slug".into()),
            title_zh: Some("中文".into()),
            title_en: Some("Fresh Title".into()),
            ..RawNote::new(1)
        })
        .unwrap();

        let note = svc.get_note_by_id(1).unwrap().unwrap();
        assert_eq!(note.slug, "fresh-title");
        assert_eq!(note.title, "中文");
    }

    #[test]
    fn save_never_slugs_a_chinese_title() {
        let mut svc = service(NotesFixture::new());
        svc.save_note(RawNote {
            title_zh: Some("UE5 筆記".into()),
            ..RawNote::new(1)
        })
        .unwrap();

        let note = svc.get_note_by_id(1).unwrap().unwrap();
        assert_eq!(note.title, "UE5 筆記");
        assert_eq!(note.slug, "");

        // A second save of the stored record must not pick up a slug either
        let stored = svc.raw_note(1).unwrap().unwrap();
        svc.save_note(stored).unwrap();
        assert_eq!(svc.get_note_by_id(1).unwrap().unwrap().slug, "");
    }

    #[test]
    fn raw_note_follows_overlay_status() {
        let svc = service(
            NotesFixture::new()
                .with_static(1, "Static", "2024-01-01")
                .with_static(2, "Edited", "2024-01-01")
                .with_static(3, "Deleted", "2024-01-01")
                .with_edit(note(2, "Edited Again", "2024-01-01"))
                .with_edit(note(9, "Overlay Only", "2024-01-01"))
                .with_deleted(3),
        );
        let title = |id| svc.raw_note(id).unwrap().and_then(|n| n.title_en);
        assert_eq!(title(1).as_deref(), Some("Static"));
        assert_eq!(title(2).as_deref(), Some("Edited Again"));
        assert_eq!(title(3), None);
        assert_eq!(title(9).as_deref(), Some("Overlay Only"));
        assert_eq!(title(4), None);
    }

    #[test]
    fn stale_deletion_loses_to_edit_in_static_position() {
        let svc = service(
            NotesFixture::new()
                .with_static(1, "First", "2024-01-01")
                .with_static(2, "Second", "2024-01-01")
                .with_edit(note(1, "First Revised", "2024-01-01"))
                .with_edit(note(8, "Added", "2024-01-01"))
                .with_deleted(1),
        );
        let notes = svc.get_notes().unwrap();
        assert_eq!(ids(&notes), vec![1, 2, 8]);
        assert_eq!(notes[0].title, "First Revised");
    }

    #[test]
    fn save_keeps_incoming_slug_without_english_title() {
        let mut svc = service(NotesFixture::new());
        svc.save_note(RawNote {
            slug: Some("hand-picked".into()),
            title_zh: Some("只有中文".into()),
            ..RawNote::new(1)
        })
        .unwrap();
        assert!(svc.get_note_by_slug("hand-picked").unwrap().is_some());
    }

    #[test]
    fn create_delete_recreate_scenario() {
        let mut svc = service(NotesFixture::new());
        let first_post = RawNote {
            title_en: Some("My First Post".into()),
            ..RawNote::new(5)
        };

        svc.save_note(first_post.clone()).unwrap();
        let note = svc.get_note_by_slug("my-first-post").unwrap().unwrap();
        assert_eq!(note.id, 5);

        svc.delete_note(5).unwrap();
        assert!(svc.get_note_by_id(5).unwrap().is_none());
        // Overlay-only notes are purged, not remembered as deleted
        assert!(svc.overlay().unwrap().deleted().is_empty());

        svc.save_note(RawNote {
            content: Some("x".into()),
            ..first_post
        })
        .unwrap();
        let note = svc.get_note_by_id(5).unwrap().unwrap();
        assert_eq!(note.content, "x");
        assert_eq!(note.slug, "my-first-post");
    }

    #[test]
    fn delete_is_idempotent() {
        let mut svc = service(NotesFixture::new().with_static(1, "Static", "2024-01-01"));
        svc.delete_note(1).unwrap();
        svc.delete_note(1).unwrap();
        svc.delete_note(42).unwrap();
        assert_eq!(svc.overlay().unwrap().deleted(), &[1]);
    }

    #[test]
    fn lookup_by_string_or_number() {
        let svc = service(NotesFixture::new().with_static(12, "Twelve", "2024-01-01"));
        assert!(svc.get_note_by_id(12).unwrap().is_some());
        assert!(svc.get_note_by_id("12").unwrap().is_some());
        assert!(svc.get_note_by_id("13").unwrap().is_none());
        assert!(svc.get_note_by_slug("twelve").unwrap().is_some());
        assert!(svc.get_note_by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn next_id_skips_deleted_and_overlay_ids() {
        let mut svc = service(
            NotesFixture::new()
                .with_static(1, "One", "2024-01-01")
                .with_static(4, "Four", "2024-01-01"),
        );
        assert_eq!(svc.next_id().unwrap(), 5);

        svc.delete_note(4).unwrap();
        assert_eq!(svc.next_id().unwrap(), 5);

        svc.save_note(note(9, "Nine", "2024-01-01")).unwrap();
        assert_eq!(svc.next_id().unwrap(), 10);
    }

    #[test]
    fn next_id_starts_at_one() {
        let svc = service(NotesFixture::new());
        assert_eq!(svc.next_id().unwrap(), 1);
    }

    #[test]
    fn corrupt_overlay_slots_fall_back_to_static() {
        let fixture = NotesFixture::new().with_static(1, "Static", "2024-01-01");
        let dataset = fixture.dataset();
        let store = InMemoryStore::new()
            .with_raw(Slot::Edits, "{broken")
            .with_raw(Slot::Deleted, "[1,");
        let svc = NoteService::new(dataset, store);

        assert_eq!(ids(&svc.get_notes().unwrap()), vec![1]);
    }

    #[test]
    fn reads_do_not_write() {
        let svc = service(NotesFixture::new().with_static(1, "Static", "2024-01-01"));
        let before = svc.store().writes();
        svc.get_notes().unwrap();
        svc.get_note_by_slug("static").unwrap();
        assert_eq!(svc.store().writes(), before);
    }

    #[test]
    fn categories_in_merged_order() {
        let svc = service(
            NotesFixture::new()
                .with_static_note(RawNote {
                    category: Some("Web & AI".into()),
                    ..note(1, "A", "2024-01-01")
                })
                .with_static_note(RawNote {
                    category: Some("Unreal Engine".into()),
                    ..note(2, "B", "2024-02-01")
                })
                .with_static_note(RawNote {
                    category: Some("Web & AI".into()),
                    ..note(3, "C", "2024-03-01")
                }),
        );
        assert_eq!(
            svc.categories().unwrap(),
            vec!["Web & AI".to_string(), "Unreal Engine".to_string()]
        );
    }

    #[test]
    fn local_content_requires_inline_body() {
        let mut svc = service(NotesFixture::new());
        svc.save_note(note(1, "Empty Body", "2024-01-01")).unwrap();
        svc.save_note(RawNote {
            content: Some("# Hi".into()),
            content_en: Some("# Hi (en)".into()),
            ..note(2, "With Body", "2024-01-01")
        })
        .unwrap();

        assert!(svc.local_content("empty-body").unwrap().is_none());
        let content = svc.local_content("with-body").unwrap().unwrap();
        assert_eq!(content.content, "# Hi");
        assert_eq!(content.content_en.as_deref(), Some("# Hi (en)"));
    }
}
