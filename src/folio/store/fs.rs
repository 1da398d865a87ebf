use super::{decode_slot, encode_slot, OverlayStore, Slot};
use crate::error::{FolioError, Result};
use crate::model::{NoteId, RawNote};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Overlay slots stored as JSON files in a single directory.
///
/// The directory is created lazily on the first write, so a fresh store
/// reads as empty without touching the filesystem.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }

    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path).map_err(FolioError::Io)?;
        Ok(Some(raw))
    }

    fn write_slot(&self, slot: Slot, content: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write: a crash mid-write must not leave a truncated slot
        let tmp_file = self.root.join(format!(".{}-{}.tmp", slot.file_name(), Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(FolioError::Io)?;
        fs::rename(&tmp_file, self.slot_path(slot)).map_err(FolioError::Io)?;
        Ok(())
    }
}

impl OverlayStore for FileStore {
    fn load_edits(&self) -> Result<Vec<RawNote>> {
        let raw = self.read_slot(Slot::Edits)?;
        Ok(decode_slot(Slot::Edits, raw.as_deref()))
    }

    fn save_edits(&mut self, edits: &[RawNote]) -> Result<()> {
        self.write_slot(Slot::Edits, &encode_slot(edits)?)
    }

    fn load_deleted(&self) -> Result<Vec<NoteId>> {
        let raw = self.read_slot(Slot::Deleted)?;
        Ok(decode_slot(Slot::Deleted, raw.as_deref()))
    }

    fn save_deleted(&mut self, ids: &[NoteId]) -> Result<()> {
        self.write_slot(Slot::Deleted, &encode_slot(ids)?)
    }
}
