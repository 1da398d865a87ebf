use clap::{Parser, Subcommand};
use folio::model::Lang;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
#[command(about = "Notes back office for a static portfolio site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub site: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Note fields shared by `create` and `edit`.
#[derive(clap::Args, Debug, Default)]
pub struct NoteFields {
    /// Chinese title
    #[arg(long)]
    pub title_zh: Option<String>,

    /// English title (the slug is derived from it)
    #[arg(long, short = 't')]
    pub title_en: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    /// e.g. "5 min read"
    #[arg(long)]
    pub read_time: Option<String>,

    /// Add a tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub summary_zh: Option<String>,

    #[arg(long)]
    pub summary_en: Option<String>,

    /// Markdown body
    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub content_zh: Option<String>,

    #[arg(long)]
    pub content_en: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, newest first
    #[command(alias = "ls")]
    List {
        /// Search titles and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only notes in this category
        #[arg(short, long)]
        category: Option<String>,

        /// List categories instead of notes
        #[arg(long)]
        categories: bool,
    },

    /// Show a note and its content
    #[command(alias = "v")]
    View {
        /// Id or slug
        note: String,

        /// Content language (zh or en)
        #[arg(long, default_value_t = Lang::Zh)]
        lang: Lang,

        /// Fetch content from the live site instead of the local posts directory
        #[arg(long)]
        remote: bool,
    },

    /// Create a note
    #[command(alias = "n")]
    Create {
        #[command(flatten)]
        fields: NoteFields,
    },

    /// Edit a note
    #[command(alias = "e")]
    Edit {
        /// Id or slug
        note: String,

        #[command(flatten)]
        fields: NoteFields,

        /// Drop existing tags before adding new ones
        #[arg(long)]
        clear_tags: bool,
    },

    /// Delete one or more notes
    #[command(alias = "rm")]
    Delete {
        /// Ids or slugs
        #[arg(required = true, num_args = 1..)]
        notes: Vec<String>,
    },

    /// Export the merged notes as JSON
    Export {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write per-note HTML with link-preview tags into the built site
    Prerender,

    /// Commit the merged notes to the site's GitHub repository
    Publish {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., site-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create .folio/config.json with defaults
    Init,
}
