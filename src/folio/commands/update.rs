use crate::commands::{CmdMessage, CmdResult, NoteDraft};
use crate::error::{FolioError, Result};
use crate::notes::NoteService;
use crate::store::OverlayStore;

use super::helpers::{require_title, resolve_note};

/// Edit a note in place. The stored record is edited, not the merged view,
/// so fallback values never get written back. Static notes are copied into
/// the overlay on first edit; the copy then shadows the static record.
pub fn run<S: OverlayStore>(
    service: &mut NoteService<S>,
    key: &str,
    draft: NoteDraft,
) -> Result<CmdResult> {
    let id = resolve_note(service, key)?.id;
    let mut note = service
        .raw_note(id)?
        .ok_or_else(|| FolioError::NoteNotFound(id.to_string()))?;
    draft.apply(&mut note);
    require_title(&note)?;
    service.save_note(note)?;

    let mut result = CmdResult::default();
    if let Some(updated) = service.get_note_by_id(id)? {
        result = result.with_affected_notes(vec![updated]);
    }
    result.add_message(CmdMessage::success(format!("Note updated: #{}", id)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawNote;
    use crate::store::memory::fixtures::{note, NotesFixture};
    use crate::store::memory::InMemoryStore;

    fn service() -> NoteService<InMemoryStore> {
        let fixture = NotesFixture::new()
            .with_static_note(RawNote {
                tags: Some(vec!["ue5".into()]),
                summary: Some("Old summary".into()),
                ..note(2, "Lighting Basics", "2024-03-01")
            })
            .with_static(3, "Other", "2024-01-01");
        NoteService::new(fixture.dataset(), fixture.store)
    }

    #[test]
    fn edit_shadows_static_note() {
        let mut service = service();
        let draft = NoteDraft {
            title_en: Some("Lighting Advanced".into()),
            tags: vec!["lumen".into()],
            ..NoteDraft::default()
        };

        let result = run(&mut service, "lighting-basics", draft).unwrap();
        let updated = &result.affected_notes[0];

        assert_eq!(updated.id, 2);
        assert_eq!(updated.title, "Lighting Advanced");
        assert_eq!(updated.slug, "lighting-advanced");
        assert_eq!(updated.tags, vec!["ue5", "lumen"]);
        assert_eq!(updated.summary, "Old summary");

        let notes = service.get_notes().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(service.overlay().unwrap().edits().len(), 1);
    }

    #[test]
    fn localized_summary_replaces_unified() {
        let mut service = service();
        let draft = NoteDraft {
            summary_en: Some("New summary".into()),
            ..NoteDraft::default()
        };
        let result = run(&mut service, "2", draft).unwrap();
        assert_eq!(result.affected_notes[0].summary, "New summary");
    }

    #[test]
    fn clear_tags() {
        let mut service = service();
        let draft = NoteDraft {
            clear_tags: true,
            ..NoteDraft::default()
        };
        let result = run(&mut service, "2", draft).unwrap();
        assert!(result.affected_notes[0].tags.is_empty());
    }

    #[test]
    fn editing_a_chinese_only_note_keeps_it_slugless() {
        let fixture = NotesFixture::new().with_static_note(RawNote {
            title_zh: Some("UE5 筆記".into()),
            date: Some("2024-01-01".into()),
            ..RawNote::new(4)
        });
        let mut service = NoteService::new(fixture.dataset(), fixture.store);

        let draft = NoteDraft {
            category: Some("Unreal Engine".into()),
            ..NoteDraft::default()
        };
        let result = run(&mut service, "4", draft).unwrap();
        let updated = &result.affected_notes[0];
        assert_eq!(updated.title, "UE5 筆記");
        assert_eq!(updated.slug, "");

        let overlay = service.overlay().unwrap();
        let stored = &overlay.edits()[0];
        assert_eq!(stored.title, None);
        assert_eq!(stored.category.as_deref(), Some("Unreal Engine"));
    }

    #[test]
    fn unknown_note_is_an_error() {
        let mut service = service();
        let err = run(&mut service, "99", NoteDraft::default()).unwrap_err();
        assert!(matches!(err, FolioError::NoteNotFound(ref key) if key == "99"));
        assert_eq!(service.store().writes(), 0);
    }
}
