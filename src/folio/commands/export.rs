use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::model::Note;
use crate::notes::NoteService;
use crate::store::OverlayStore;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

/// Serialize notes the way the site's dataset file is laid out: a JSON array
/// indented by four spaces.
pub fn to_dataset_json(notes: &[Note]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    notes.serialize(&mut ser).map_err(FolioError::Serialization)?;
    String::from_utf8(buf).map_err(|e| FolioError::Store(e.to_string()))
}

/// Export the merged view. Without a target the JSON is returned as output.
pub fn run<S: OverlayStore>(service: &NoteService<S>, target: Option<&Path>) -> Result<CmdResult> {
    let notes = service.get_notes()?;
    let json = to_dataset_json(&notes)?;

    let mut result = CmdResult::default();
    match target {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(FolioError::Io)?;
            }
            fs::write(path, json).map_err(FolioError::Io)?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} notes to {}",
                notes.len(),
                path.display()
            )));
            result.written_paths.push(path.to_path_buf());
        }
        None => result.output = Some(json),
    }
    Ok(result)
}
