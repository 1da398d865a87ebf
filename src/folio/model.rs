//! Note records.
//!
//! Two shapes exist:
//!
//! - [`RawNote`] is what lives on disk: the static dataset and the overlay
//!   store both hold it. Every field except `id` is optional because the
//!   dataset went through several revisions (unified `title` vs. the legacy
//!   `title_zh` / `title_en` pair, inline vs. per-slug content).
//! - [`Note`] is the canonical shape handed to everything above the storage
//!   boundary. [`RawNote::normalize`] is the only place that knows about the
//!   fallback chains.

use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type NoteId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNote {
    pub id: NoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        rename = "readTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    /// Fields this crate does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// First candidate that is present and non-empty.
fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl RawNote {
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// `title`, then `title_zh`, then `title_en`.
    pub fn display_title(&self) -> String {
        first_non_empty(&[&self.title, &self.title_zh, &self.title_en]).unwrap_or_default()
    }

    /// The title slugs are derived from: `title_en`, then `title`.
    pub fn slug_source(&self) -> String {
        first_non_empty(&[&self.title_en, &self.title]).unwrap_or_default()
    }

    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Map the record onto the canonical shape. An explicit slug is kept,
    /// otherwise one is derived from the English title.
    pub fn normalize(&self) -> Note {
        let slug = match self.slug.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => slugify(&self.slug_source()),
        };

        Note {
            id: self.id,
            slug,
            title: self.display_title(),
            title_zh: self.title_zh.clone(),
            title_en: self.title_en.clone(),
            category: self.category.clone().unwrap_or_default(),
            date: self.date.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            read_time: self.read_time.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            summary: first_non_empty(&[&self.summary, &self.summary_zh, &self.summary_en])
                .unwrap_or_default(),
            summary_zh: self.summary_zh.clone(),
            summary_en: self.summary_en.clone(),
            content: first_non_empty(&[&self.content, &self.content_zh, &self.content_en])
                .unwrap_or_default(),
            content_zh: self.content_zh.clone(),
            content_en: self.content_en.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// A note as seen by readers of the merged view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub category: String,
    pub date: String,
    pub author: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_en: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Note {
    /// Title in the requested language, falling back to the unified title.
    pub fn localized_title(&self, lang: Lang) -> &str {
        let preferred = match lang {
            Lang::Zh => self.title_zh.as_deref(),
            Lang::En => self.title_en.as_deref(),
        };
        preferred.filter(|t| !t.is_empty()).unwrap_or(&self.title)
    }
}

/// The long-form body of a note, inline or from a per-slug content file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteContent {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
}

impl NoteContent {
    pub fn from_raw(note: &RawNote) -> Self {
        Self {
            content: note.content.clone().unwrap_or_default(),
            content_zh: note.content_zh.clone(),
            content_en: note.content_en.clone(),
        }
    }

    /// `content_en || content` for English, `content_zh || content` for Chinese.
    pub fn localized(&self, lang: Lang) -> &str {
        let preferred = match lang {
            Lang::Zh => self.content_zh.as_deref(),
            Lang::En => self.content_en.as_deref(),
        };
        preferred.filter(|c| !c.is_empty()).unwrap_or(&self.content)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Zh => f.write_str("zh"),
            Lang::En => f.write_str("en"),
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" => Ok(Lang::Zh),
            "en" => Ok(Lang::En),
            other => Err(format!("unsupported language: {} (expected zh or en)", other)),
        }
    }
}
