//! Per-note HTML for link previews.
//!
//! The site is a single-page app, so crawlers fetching `/notes/{slug}` only
//! ever see the generic `index.html`. After the site build, [`prerender`]
//! copies the built template once per note into `notes/{slug}/index.html`
//! with the title, description, canonical URL and social image rewritten for
//! that note.
//!
//! Only known tag shapes are rewritten; tags missing from the template are not
//! added:
//!
//! ```text
//! <title>…</title>
//! <meta property|name="og:title|og:description|og:url|og:image" content="…">
//! <meta property|name="twitter:title|twitter:description|twitter:image" content="…">
//! <link rel="canonical" href="…">
//! ```

use crate::content::read_content_file;
use crate::error::{FolioError, Result};
use crate::model::Note;
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag};
use regex::{Captures, Regex};
use std::fs;
use std::path::PathBuf;

static TITLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title>.*?</title>").unwrap());
static CANONICAL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<link\s+rel="canonical"\s+href="[^"]*"(\s*/?)>"#).unwrap()
});

#[derive(Debug, Clone)]
pub struct PrerenderOptions {
    /// Directory holding the built site (`index.html` is the template).
    pub dist_dir: PathBuf,
    /// Per-slug content files, consulted when a note has no inline content.
    pub posts_dir: Option<PathBuf>,
    /// Appended to every page title: `{note title} | {site name}`.
    pub site_name: String,
    /// Public base URL of the site.
    pub site_url: String,
    /// Image used when a note has none of its own.
    pub default_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub image_url: String,
}

impl PageMeta {
    /// Metadata for a note. `body` is the markdown scanned for an image.
    pub fn for_note(note: &Note, body: Option<&str>, opts: &PrerenderOptions) -> Self {
        let title = note
            .title_zh
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&note.title);
        let image = body
            .and_then(first_image)
            .unwrap_or_else(|| opts.default_image.clone());

        Self {
            title: format!("{} | {}", title, opts.site_name),
            description: note.summary.clone(),
            canonical_url: format!("{}/notes/{}", opts.site_url.trim_end_matches('/'), note.slug),
            image_url: resolve_asset_url(&image, &opts.site_url),
        }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn html_attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

/// The destination of the first image in a markdown document.
pub fn first_image(markdown: &str) -> Option<String> {
    Parser::new(markdown).find_map(|event| match event {
        Event::Start(Tag::Image { dest_url, .. }) if !dest_url.is_empty() => {
            Some(dest_url.to_string())
        }
        _ => None,
    })
}

/// Make an asset reference absolute against the public site URL.
///
/// Authors sometimes write `public/img/x.png`; the public folder is served at
/// the site root, so that prefix is dropped. Absolute and protocol-relative
/// URLs are left alone.
pub fn resolve_asset_url(href: &str, site_url: &str) -> String {
    let href = href.strip_prefix("public/").unwrap_or(href);
    if href.starts_with("http") || href.starts_with("//") {
        return href.to_string();
    }
    let base = site_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}

fn replace_meta(html: &str, key: &str, value: &str) -> String {
    let pattern = format!(
        r#"(?i)<meta\s+(property|name)="{}"\s+content="[^"]*"(\s*/?)>"#,
        regex::escape(key)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return html.to_string(),
    };
    let value = html_attr_escape(value);
    re.replace_all(html, |caps: &Captures| {
        format!(r#"<meta {}="{}" content="{}"{}>"#, &caps[1], key, value, &caps[2])
    })
    .into_owned()
}

/// Rewrite the known head tags of `template` for one page.
pub fn render_page(template: &str, meta: &PageMeta) -> String {
    let title = html_escape(&meta.title);
    let mut html = TITLE_TAG
        .replace_all(template, |_: &Captures| format!("<title>{}</title>", title))
        .into_owned();

    for (key, value) in [
        ("og:title", &meta.title),
        ("og:description", &meta.description),
        ("og:url", &meta.canonical_url),
        ("og:image", &meta.image_url),
        ("twitter:title", &meta.title),
        ("twitter:description", &meta.description),
        ("twitter:image", &meta.image_url),
    ] {
        html = replace_meta(&html, key, value);
    }

    let href = html_attr_escape(&meta.canonical_url);
    CANONICAL_LINK
        .replace_all(&html, |caps: &Captures| {
            format!(r#"<link rel="canonical" href="{}"{}>"#, href, &caps[1])
        })
        .into_owned()
}

/// Write `notes/{slug}/index.html` under the dist directory for every note.
/// Returns the written paths. Notes without a slug are skipped.
pub fn prerender(notes: &[Note], opts: &PrerenderOptions) -> Result<Vec<PathBuf>> {
    let template_path = opts.dist_dir.join("index.html");
    if !template_path.exists() {
        return Err(FolioError::Api(format!(
            "{} not found. Build the site first.",
            template_path.display()
        )));
    }
    let template = fs::read_to_string(&template_path).map_err(FolioError::Io)?;

    let mut written = Vec::new();
    for note in notes {
        if note.slug.is_empty() {
            tracing::warn!(id = note.id, "skipping note without a slug");
            continue;
        }

        let body = if note.content.is_empty() {
            opts.posts_dir
                .as_ref()
                .and_then(|dir| {
                    read_content_file(&dir.join(format!("{}.json", note.slug)))
                        .map_err(|e| {
                            tracing::warn!(slug = %note.slug, error = %e, "unreadable content file")
                        })
                        .ok()
                        .flatten()
                })
                .map(|c| c.content)
        } else {
            Some(note.content.clone())
        };

        let meta = PageMeta::for_note(note, body.as_deref(), opts);
        let html = render_page(&template, &meta);

        let note_dir = opts.dist_dir.join("notes").join(&note.slug);
        fs::create_dir_all(&note_dir).map_err(FolioError::Io)?;
        let out = note_dir.join("index.html");
        fs::write(&out, html).map_err(FolioError::Io)?;
        tracing::info!(slug = %note.slug, "prerendered /notes/{}", note.slug);
        written.push(out);
    }

    Ok(written)
}
