use crate::commands::{CmdMessage, CmdResult};
use crate::config::GitHubConfig;
use crate::error::{FolioError, Result};
use crate::model::NoteContent;
use crate::notes::NoteService;
use crate::store::OverlayStore;
use crate::sync::{FileChange, GitHubClient, RepoTarget};

use super::export::to_dataset_json;

const COMMIT_MESSAGE: &str = "Update notes";

/// The files a publish writes: the merged dataset, plus one content file
/// per edited note that carries a body.
pub fn collect_files<S: OverlayStore>(
    service: &NoteService<S>,
    github: &GitHubConfig,
) -> Result<Vec<FileChange>> {
    let notes = service.get_notes()?;
    let mut files = vec![FileChange::new(
        github.dataset_path.clone(),
        to_dataset_json(&notes)?,
    )];

    let posts_dir = github.posts_dir.trim_end_matches('/');
    for raw in service.overlay()?.edits() {
        if !raw.has_content() {
            continue;
        }
        let slug = raw.normalize().slug;
        if slug.is_empty() {
            tracing::warn!(id = raw.id, "not publishing content of a note without a slug");
            continue;
        }
        let body = serde_json::to_string_pretty(&NoteContent::from_raw(raw))
            .map_err(FolioError::Serialization)?;
        files.push(FileChange::new(format!("{}/{}.json", posts_dir, slug), body));
    }

    Ok(files)
}

pub async fn run<S: OverlayStore>(
    service: &NoteService<S>,
    github: Option<&GitHubConfig>,
    client: &GitHubClient,
    message: Option<&str>,
) -> Result<CmdResult> {
    let github = github.ok_or_else(|| {
        FolioError::Validation(
            "Publishing is not configured: add a \"github\" section to .folio/config.json".into(),
        )
    })?;
    let target = RepoTarget {
        owner: github.owner.clone(),
        repo: github.repo.clone(),
        branch: github.branch.clone(),
    };

    let files = collect_files(service, github)?;
    let outcome = client
        .commit_files(&target, &files, message.unwrap_or(COMMIT_MESSAGE))
        .await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Published {} files to {}/{}@{} ({})",
        outcome.files,
        target.owner,
        target.repo,
        target.branch,
        short_sha(&outcome.commit_sha)
    )));
    Ok(result)
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
