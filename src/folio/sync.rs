//! Publishing to the hosting repository.
//!
//! Overlay edits only become permanent once the merged dataset replaces the
//! static one in the site's repository. [`GitHubClient::commit_files`] writes
//! any number of files as one commit through the Git data API:
//!
//! ```text
//! GET   git/ref/heads/{branch}     -> tip commit sha
//! GET   git/commits/{tip}          -> base tree sha
//! POST  git/blobs                  (once per file)
//! POST  git/trees                  base_tree + blobs
//! POST  git/commits                parent = tip
//! PATCH git/refs/heads/{branch}    fast-forward only
//! ```
//!
//! Each step is attempted once. The first failure stops the publish and is
//! reported as [`FolioError::Sync`] naming the step. If the ref update fails
//! after the commit was created, that commit is left unreferenced.

use crate::error::{FolioError, Result, SyncStep};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

pub const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// A file to write, path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub content: String,
}

impl FileChange {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub commit_sha: String,
    pub files: usize,
}

#[derive(Deserialize)]
struct ObjectRef {
    sha: String,
}

#[derive(Deserialize)]
struct RefResponse {
    object: ObjectRef,
}

#[derive(Deserialize)]
struct CommitResponse {
    tree: ObjectRef,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: GITHUB_API.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at another API root (GitHub Enterprise, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: Method, target: &RepoTarget, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/repos/{}/{}/{}",
            self.api_base, target.owner, target.repo, path
        );
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", concat!("folio/", env!("CARGO_PKG_VERSION")))
    }

    /// The commit sha the branch points at, `None` if there is no such branch.
    pub async fn branch_head(&self, target: &RepoTarget) -> Result<Option<String>> {
        let step = SyncStep::BranchLookup;
        let response = send(
            step,
            self.request(
                Method::GET,
                target,
                &format!("git/ref/heads/{}", target.branch),
            ),
        )
        .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let head: RefResponse = expect_json(step, response).await?;
        Ok(Some(head.object.sha))
    }

    /// Write `files` to the branch as a single commit.
    pub async fn commit_files(
        &self,
        target: &RepoTarget,
        files: &[FileChange],
        message: &str,
    ) -> Result<CommitOutcome> {
        if files.is_empty() {
            return Err(FolioError::Validation("Nothing to publish".into()));
        }

        let tip = self.branch_head(target).await?.ok_or_else(|| {
            FolioError::sync(
                SyncStep::BranchLookup,
                format!("branch {} not found", target.branch),
            )
        })?;
        tracing::debug!(branch = %target.branch, %tip, "resolved branch tip");

        let step = SyncStep::BaseCommit;
        let base: CommitResponse = expect_json(
            step,
            send(
                step,
                self.request(Method::GET, target, &format!("git/commits/{}", tip)),
            )
            .await?,
        )
        .await?;

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let step = SyncStep::BlobCreation;
            let blob: ObjectRef = expect_json(
                step,
                send(
                    step,
                    self.request(Method::POST, target, "git/blobs").json(&json!({
                        "content": file.content,
                        "encoding": "utf-8",
                    })),
                )
                .await?,
            )
            .await?;
            tracing::debug!(path = %file.path, sha = %blob.sha, "created blob");
            entries.push(json!({
                "path": file.path,
                "mode": "100644",
                "type": "blob",
                "sha": blob.sha,
            }));
        }

        let step = SyncStep::TreeCreation;
        let tree: ObjectRef = expect_json(
            step,
            send(
                step,
                self.request(Method::POST, target, "git/trees").json(&json!({
                    "base_tree": base.tree.sha,
                    "tree": entries,
                })),
            )
            .await?,
        )
        .await?;

        let step = SyncStep::CommitCreation;
        let commit: ObjectRef = expect_json(
            step,
            send(
                step,
                self.request(Method::POST, target, "git/commits").json(&json!({
                    "message": message,
                    "tree": tree.sha,
                    "parents": [tip],
                })),
            )
            .await?,
        )
        .await?;

        let step = SyncStep::RefUpdate;
        let _: RefResponse = expect_json(
            step,
            send(
                step,
                self.request(
                    Method::PATCH,
                    target,
                    &format!("git/refs/heads/{}", target.branch),
                )
                .json(&json!({ "sha": commit.sha, "force": false })),
            )
            .await?,
        )
        .await?;

        tracing::info!(
            branch = %target.branch,
            commit = %commit.sha,
            files = files.len(),
            "published"
        );
        Ok(CommitOutcome {
            commit_sha: commit.sha,
            files: files.len(),
        })
    }
}

async fn send(step: SyncStep, request: RequestBuilder) -> Result<Response> {
    request
        .send()
        .await
        .map_err(|e| FolioError::sync(step, e.to_string()))
}

async fn expect_json<T: DeserializeOwned>(step: SyncStep, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        return Err(FolioError::sync(step, message));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FolioError::sync(step, format!("unexpected response: {}", e)))
}
