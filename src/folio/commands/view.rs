use crate::commands::{CmdMessage, CmdResult};
use crate::content::{get_note_content, ContentSource};
use crate::error::Result;
use crate::model::NoteContent;
use crate::notes::NoteService;
use crate::overlay::NoteStatus;
use crate::store::OverlayStore;

use super::helpers::resolve_note;

/// Show one note with its body. A missing body is reported, not an error.
pub async fn run<S, C>(service: &NoteService<S>, source: &C, key: &str) -> Result<CmdResult>
where
    S: OverlayStore,
    C: ContentSource + ?Sized,
{
    let note = resolve_note(service, key)?;

    let mut result = CmdResult::default();
    result.content = if note.content.is_empty() {
        get_note_content(service, source, &note.slug).await
    } else {
        Some(NoteContent {
            content: note.content.clone(),
            content_zh: note.content_zh.clone(),
            content_en: note.content_en.clone(),
        })
    };
    if let NoteStatus::Edited(_) = service.overlay()?.status(note.id) {
        result.add_message(CmdMessage::info("Edited locally, not yet published"));
    }
    if result.content.is_none() {
        result.add_message(CmdMessage::warning(format!(
            "No content found for {}",
            note.slug
        )));
    }

    Ok(result.with_listed_notes(vec![note]))
}
