//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! folio operations, whatever the UI.
//!
//! The facade dispatches to `commands/*.rs`, resolves configured paths against
//! the site root, and returns `Result<CmdResult>`. It does no printing and
//! holds no business logic.
//!
//! `FolioApi<S: OverlayStore>` is generic over the overlay backend:
//! - Production: `FolioApi<FileStore>`
//! - Testing: `FolioApi<InMemoryStore>`
//!
//! API tests check dispatch and argument plumbing only; behaviour is tested
//! in the command modules.

use crate::commands;
use crate::config::FolioConfig;
use crate::content::{ContentSource, DirContentSource};
use crate::error::Result;
use crate::notes::NoteService;
use crate::store::OverlayStore;
use crate::sync::GitHubClient;
use std::path::{Path, PathBuf};

pub struct FolioApi<S: OverlayStore> {
    service: NoteService<S>,
    config: FolioConfig,
    paths: commands::FolioPaths,
    site_root: PathBuf,
}

impl<S: OverlayStore> FolioApi<S> {
    pub fn new(
        service: NoteService<S>,
        config: FolioConfig,
        paths: commands::FolioPaths,
        site_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            config,
            paths,
            site_root: site_root.into(),
        }
    }

    pub fn list_notes(&self, filter: &NoteFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.service, filter)
    }

    pub fn categories(&self) -> Result<commands::CmdResult> {
        commands::list::categories(&self.service)
    }

    pub async fn view_note<C>(&self, key: &str, source: &C) -> Result<commands::CmdResult>
    where
        C: ContentSource + ?Sized,
    {
        commands::view::run(&self.service, source, key).await
    }

    /// Content files on disk, next to the site sources.
    pub fn local_content_source(&self) -> DirContentSource {
        DirContentSource::new(self.site_root.join(&self.config.posts_dir))
    }

    pub fn create_note(&mut self, draft: NoteDraft) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.service, &self.config.defaults, draft)
    }

    pub fn update_note(&mut self, key: &str, draft: NoteDraft) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.service, key, draft)
    }

    pub fn delete_notes(&mut self, keys: &[String]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.service, keys)
    }

    pub fn export_notes(&self, target: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.service, target)
    }

    pub fn prerender(&self) -> Result<commands::CmdResult> {
        commands::prerender::run(self.service.dataset(), &self.config, &self.site_root)
    }

    pub async fn publish(
        &self,
        client: &GitHubClient,
        message: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::publish::run(&self.service, self.config.github.as_ref(), client, message).await
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn settings(&self) -> &FolioConfig {
        &self.config
    }

    pub fn paths(&self) -> &commands::FolioPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::NoteFilter;
pub use commands::{CmdMessage, CmdResult, FolioPaths, MessageLevel, NoteDraft};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::NotesFixture;
    use crate::store::memory::InMemoryStore;

    fn api(root: &Path) -> FolioApi<InMemoryStore> {
        let fixture = NotesFixture::new()
            .with_static(1, "Alpha", "2024-01-01")
            .with_static(2, "Beta", "2024-02-01");
        let service = NoteService::new(fixture.dataset(), fixture.store);
        let paths = FolioPaths {
            config_dir: root.join(".folio"),
            store_dir: root.join("store"),
        };
        FolioApi::new(service, FolioConfig::default(), paths, root)
    }

    #[test]
    fn create_uses_configured_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());
        let result = api
            .create_note(NoteDraft {
                title_en: Some("Gamma".into()),
                ..NoteDraft::default()
            })
            .unwrap();
        assert_eq!(result.affected_notes[0].id, 3);
        assert_eq!(result.affected_notes[0].author, api.settings().defaults.author);
    }

    #[test]
    fn list_update_delete_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api(dir.path());

        api.update_note(
            "alpha",
            NoteDraft {
                date: Some("2025-01-01".into()),
                ..NoteDraft::default()
            },
        )
        .unwrap();
        let listed = api.list_notes(&NoteFilter::default()).unwrap().listed_notes;
        assert_eq!(listed[0].id, 1);

        api.delete_notes(&["beta".into()]).unwrap();
        assert_eq!(api.list_notes(&NoteFilter::default()).unwrap().listed_notes.len(), 1);
    }

    #[test]
    fn local_content_source_is_under_site_root() {
        let dir = tempfile::tempdir().unwrap();
        let api = api(dir.path());
        assert_eq!(
            api.local_content_source().content_path("alpha"),
            dir.path().join("public/posts/alpha.json")
        );
    }

    #[tokio::test]
    async fn view_reads_local_content() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("public/posts");
        std::fs::create_dir_all(&posts).unwrap();
        std::fs::write(posts.join("beta.json"), r#"{"content": "beta body"}"#).unwrap();

        let api = api(dir.path());
        let source = api.local_content_source();
        let result = api.view_note("2", &source).await.unwrap();
        assert_eq!(result.content.unwrap().content, "beta body");
    }

    #[test]
    fn init_and_config_use_paths() {
        let dir = tempfile::tempdir().unwrap();
        let api = api(dir.path());
        api.init().unwrap();
        let result = api
            .config(ConfigAction::ShowKey("read-time".into()))
            .unwrap();
        assert_eq!(result.messages[0].content, "5 min read");
    }
}
