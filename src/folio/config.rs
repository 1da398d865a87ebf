use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for folio, stored in `.folio/config.json` next to the site.
///
/// Every field has a default so a partial (or missing) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    /// The bundled static dataset
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Per-slug content files (`{slug}.json`)
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Output of the site build, prerendered in place
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Overlay store directory. Defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub defaults: NoteDefaults,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public base URL, used for canonical links, images and remote content
    #[serde(default = "default_site_url")]
    pub url: String,

    #[serde(default = "default_image")]
    pub default_image: String,
}

/// Values a newly created note starts with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteDefaults {
    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_read_time")]
    pub read_time: String,

    /// Offered categories; the first is the default
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Repository path of the static dataset
    #[serde(default = "default_repo_dataset_path")]
    pub dataset_path: String,
    /// Repository directory of the per-slug content files
    #[serde(default = "default_repo_posts_dir")]
    pub posts_dir: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("src/assets/data/notes.json")
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("public/posts")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_site_name() -> String {
    "Notes".to_string()
}

fn default_site_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_image() -> String {
    "og-image.png".to_string()
}

fn default_author() -> String {
    "Admin".to_string()
}

fn default_read_time() -> String {
    "5 min read".to_string()
}

fn default_categories() -> Vec<String> {
    vec![
        "Unreal Engine".to_string(),
        "Virtual Production".to_string(),
        "Broadcast IP".to_string(),
        "Web & AI".to_string(),
    ]
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_repo_dataset_path() -> String {
    "src/assets/data/notes.json".to_string()
}

fn default_repo_posts_dir() -> String {
    "public/posts".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            default_image: default_image(),
        }
    }
}

impl Default for NoteDefaults {
    fn default() -> Self {
        Self {
            author: default_author(),
            read_time: default_read_time(),
            categories: default_categories(),
        }
    }
}

impl NoteDefaults {
    pub fn category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("")
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            posts_dir: default_posts_dir(),
            dist_dir: default_dist_dir(),
            store_dir: None,
            site: SiteConfig::default(),
            defaults: NoteDefaults::default(),
            github: None,
        }
    }
}

/// Keys settable through `folio config <key> <value>`.
pub const SETTABLE_KEYS: &[&str] = &[
    "dataset-path",
    "posts-dir",
    "dist-dir",
    "store-dir",
    "site-name",
    "site-url",
    "default-image",
    "author",
    "read-time",
];

impl FolioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FolioError::Io)?;
        let config: FolioConfig =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FolioError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        fs::write(config_path, content).map_err(FolioError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "dataset-path" => self.dataset_path.display().to_string(),
            "posts-dir" => self.posts_dir.display().to_string(),
            "dist-dir" => self.dist_dir.display().to_string(),
            "store-dir" => self
                .store_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "site-name" => self.site.name.clone(),
            "site-url" => self.site.url.clone(),
            "default-image" => self.site.default_image.clone(),
            "author" => self.defaults.author.clone(),
            "read-time" => self.defaults.read_time.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "dataset-path" => self.dataset_path = PathBuf::from(value),
            "posts-dir" => self.posts_dir = PathBuf::from(value),
            "dist-dir" => self.dist_dir = PathBuf::from(value),
            "store-dir" => {
                self.store_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "site-name" => self.site.name = value.to_string(),
            "site-url" => self.site.url = value.trim_end_matches('/').to_string(),
            "default-image" => self.site.default_image = value.to_string(),
            "author" => self.defaults.author = value.to_string(),
            "read-time" => self.defaults.read_time = value.to_string(),
            other => {
                return Err(FolioError::Validation(format!(
                    "Unknown config key: {} (expected one of {})",
                    other,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.posts_dir, PathBuf::from("public/posts"));
        assert_eq!(config.defaults.category(), "Unreal Engine");
        assert!(config.github.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = FolioConfig::load(dir.path()).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"site": {"name": "Annie Su"}, "github": {"owner": "annie", "repo": "site"}}"#,
        )
        .unwrap();

        let config = FolioConfig::load(dir.path()).unwrap();
        assert_eq!(config.site.name, "Annie Su");
        assert_eq!(config.site.url, "http://localhost:5173");
        let github = config.github.unwrap();
        assert_eq!(github.branch, "main");
        assert_eq!(github.dataset_path, "src/assets/data/notes.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(".folio");

        let mut config = FolioConfig::default();
        config.set("site-url", "https://annie.dev/").unwrap();
        config.set("author", "Annie Su").unwrap();
        config.save(&nested).unwrap();

        let loaded = FolioConfig::load(&nested).unwrap();
        assert_eq!(loaded.site.url, "https://annie.dev");
        assert_eq!(loaded.get("author").as_deref(), Some("Annie Su"));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = FolioConfig::default();
        assert!(config.set("file-ext", ".md").is_err());
        assert_eq!(config.get("file-ext"), None);
    }
}
