use crate::commands::{CmdMessage, CmdResult, NoteDraft};
use crate::config::NoteDefaults;
use crate::error::Result;
use crate::model::RawNote;
use crate::notes::NoteService;
use crate::store::OverlayStore;
use chrono::Local;

use super::helpers::require_title;

pub fn run<S: OverlayStore>(
    service: &mut NoteService<S>,
    defaults: &NoteDefaults,
    draft: NoteDraft,
) -> Result<CmdResult> {
    let id = service.next_id()?;
    let mut note = RawNote {
        category: Some(defaults.category().to_string()),
        date: Some(Local::now().format("%Y-%m-%d").to_string()),
        author: Some(defaults.author.clone()),
        read_time: Some(defaults.read_time.clone()),
        tags: Some(Vec::new()),
        ..RawNote::new(id)
    };
    draft.apply(&mut note);
    require_title(&note)?;

    service.save_note(note)?;
    tracing::debug!(id, "created note");

    let mut result = CmdResult::default();
    if let Some(created) = service.get_note_by_id(id)? {
        result = result.with_affected_notes(vec![created]);
    }
    result.add_message(CmdMessage::success(format!("Note created: #{}", id)));
    Ok(result)
}
