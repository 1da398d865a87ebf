//! The bundled static dataset (`notes.json`).
//!
//! Read-only at runtime. It is replaced wholesale at build time, typically by
//! committing an exported or published merged view.

use crate::error::{FolioError, Result};
use crate::model::{Note, NoteId, RawNote};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    notes: Vec<RawNote>,
}

impl StaticDataset {
    pub fn from_notes(notes: Vec<RawNote>) -> Self {
        Self { notes }
    }

    /// Load the dataset from a JSON array file.
    ///
    /// Unlike the overlay store, a missing or malformed dataset is an error:
    /// it is a build artefact and there is nothing sensible to fall back to.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FolioError::Store(format!("Cannot read dataset {}: {}", path.display(), e))
        })?;
        let notes: Vec<RawNote> =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        tracing::debug!(path = %path.display(), count = notes.len(), "loaded static dataset");
        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[RawNote] {
        &self.notes
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    /// Static records in the canonical shape, ignoring any overlay.
    pub fn normalized(&self) -> Vec<Note> {
        self.notes.iter().map(RawNote::normalize).collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"[{"id": 1, "title": "One"}, {"id": 2}]"#).unwrap();

        let dataset = StaticDataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.contains(2));
        assert!(!dataset.contains(3));
        assert_eq!(dataset.normalized()[0].slug, "one");
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StaticDataset::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(FolioError::Store(_))));
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            StaticDataset::load(&path),
            Err(FolioError::Serialization(_))
        ));
    }
}
