//! Long-form note content.
//!
//! Note bodies are not necessarily part of the dataset: published notes keep
//! them in a per-slug JSON file (`posts/{slug}.json`) fetched on demand.
//! [`get_note_content`] resolves a body in this order:
//!
//! 1. an overlay record with the slug and a non-empty `content` (no I/O)
//! 2. the configured [`ContentSource`]
//!
//! Every failure along the way (non-success status, network error, malformed
//! JSON) is logged and resolves to `None`, which readers render as "not
//! found". There is no caching, de-duplication or cancellation: each call is
//! independent.

use crate::error::{FolioError, Result};
use crate::model::NoteContent;
use crate::notes::NoteService;
use crate::store::OverlayStore;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::fs;
use std::path::{Path, PathBuf};

/// Somewhere per-slug content files can be read from.
#[async_trait]
pub trait ContentSource {
    /// `Ok(None)` when the source has no content for the slug.
    async fn fetch(&self, slug: &str) -> Result<Option<NoteContent>>;
}

/// Content served over HTTP at `{base}/posts/{slug}.json`.
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
}

impl HttpContentSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FolioError::Api(format!("Invalid content URL {}: {}", base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn content_url(&self, slug: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FolioError::Api(format!("Content URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["posts", &format!("{}.json", slug)]);
        Ok(url)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, slug: &str) -> Result<Option<NoteContent>> {
        let url = self.content_url(slug)?;
        tracing::debug!(%url, "fetching note content");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FolioError::Api(format!(
                "Content request for {} returned {}",
                slug, status
            )));
        }
        Ok(Some(response.json::<NoteContent>().await?))
    }
}

/// Content files on disk, `{root}/{slug}.json`. Used for local previews and
/// by the prerender step.
pub struct DirContentSource {
    root: PathBuf,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn content_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.json", slug))
    }
}

#[async_trait]
impl ContentSource for DirContentSource {
    async fn fetch(&self, slug: &str) -> Result<Option<NoteContent>> {
        read_content_file(&self.content_path(slug))
    }
}

/// Read a per-slug content file. A missing file is `Ok(None)`.
pub fn read_content_file(path: &Path) -> Result<Option<NoteContent>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).map_err(FolioError::Io)?;
    let content = serde_json::from_str(&raw).map_err(FolioError::Serialization)?;
    Ok(Some(content))
}

/// Resolve the body of the note with this slug. Never fails: problems are
/// logged and surface as `None`.
pub async fn get_note_content<S, C>(
    service: &NoteService<S>,
    source: &C,
    slug: &str,
) -> Option<NoteContent>
where
    S: OverlayStore,
    C: ContentSource + ?Sized,
{
    match service.local_content(slug) {
        Ok(Some(content)) => return Some(content),
        Ok(None) => {}
        Err(e) => tracing::warn!(slug, error = %e, "cannot read overlay content"),
    }

    match source.fetch(slug).await {
        Ok(found) => {
            if found.is_none() {
                tracing::info!(slug, "no content found");
            }
            found
        }
        Err(e) => {
            tracing::error!(slug, error = %e, "failed to fetch note content");
            None
        }
    }
}
