use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::notes::NoteService;
use crate::store::OverlayStore;

use super::helpers::resolve_note;

pub fn run<S: OverlayStore>(service: &mut NoteService<S>, keys: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut deleted = Vec::new();

    for key in keys {
        let note = resolve_note(service, key)?;
        service.delete_note(note.id)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted #{} {}",
            note.id, note.title
        )));
        deleted.push(note);
    }

    Ok(result.with_affected_notes(deleted))
}
