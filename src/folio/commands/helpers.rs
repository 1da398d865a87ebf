use super::NoteDraft;
use crate::error::{FolioError, Result};
use crate::model::{Note, RawNote};
use crate::notes::NoteService;
use crate::store::OverlayStore;

/// Find a note by id or, failing that, by slug.
pub fn resolve_note<S: OverlayStore>(service: &NoteService<S>, key: &str) -> Result<Note> {
    let key = key.trim();
    if let Some(note) = service.get_note_by_id(key)? {
        return Ok(note);
    }
    service
        .get_note_by_slug(key)?
        .ok_or_else(|| FolioError::NoteNotFound(key.to_string()))
}

/// Append a tag unless it is blank or already present.
pub fn add_tag(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return;
    }
    tags.push(tag.to_string());
}

/// Reject records a reader could not show: there must be some title.
pub fn require_title(note: &RawNote) -> Result<()> {
    if note.display_title().trim().is_empty() {
        return Err(FolioError::Validation("A title is required".into()));
    }
    Ok(())
}

impl NoteDraft {
    /// Write the supplied fields onto a record.
    ///
    /// Setting a localized title, summary or content drops the unified field
    /// so it is derived again from the localized ones.
    pub fn apply(self, note: &mut RawNote) {
        if self.title_zh.is_some() || self.title_en.is_some() {
            note.title = None;
        }
        if self.summary_zh.is_some() || self.summary_en.is_some() {
            note.summary = None;
        }
        if self.content_zh.is_some() || self.content_en.is_some() {
            note.content = None;
        }

        set(&mut note.title_zh, self.title_zh);
        set(&mut note.title_en, self.title_en);
        set(&mut note.category, self.category);
        set(&mut note.date, self.date);
        set(&mut note.author, self.author);
        set(&mut note.read_time, self.read_time);
        set(&mut note.summary_zh, self.summary_zh);
        set(&mut note.summary_en, self.summary_en);
        set(&mut note.content_zh, self.content_zh);
        set(&mut note.content_en, self.content_en);
        set(&mut note.content, self.content);

        let mut tags = if self.clear_tags {
            Vec::new()
        } else {
            note.tags.take().unwrap_or_default()
        };
        for tag in &self.tags {
            add_tag(&mut tags, tag);
        }
        note.tags = Some(tags);
    }
}

fn set(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value {
        *field = Some(v);
    }
}
