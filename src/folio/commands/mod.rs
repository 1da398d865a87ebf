use crate::config::FolioConfig;
use crate::model::{Note, NoteContent};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod init;
pub mod list;
pub mod prerender;
pub mod publish;
pub mod update;
pub mod view;

/// Where folio keeps its own state.
#[derive(Debug, Clone)]
pub struct FolioPaths {
    /// `.folio/` in the site directory; holds `config.json`
    pub config_dir: PathBuf,
    /// Overlay store directory
    pub store_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub categories: Vec<String>,
    pub content: Option<NoteContent>,
    pub written_paths: Vec<PathBuf>,
    /// Text meant for stdout as-is (exports)
    pub output: Option<String>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Field values supplied by the user when creating or editing a note.
/// `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title_zh: Option<String>,
    pub title_en: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub read_time: Option<String>,
    pub tags: Vec<String>,
    pub clear_tags: bool,
    pub summary_zh: Option<String>,
    pub summary_en: Option<String>,
    pub content: Option<String>,
    pub content_zh: Option<String>,
    pub content_en: Option<String>,
}
