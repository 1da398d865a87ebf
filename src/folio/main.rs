use clap::Parser;
use directories::ProjectDirs;
use folio::api::{ConfigAction, FolioApi, FolioPaths, NoteDraft, NoteFilter};
use folio::config::FolioConfig;
use folio::content::{ContentSource, HttpContentSource};
use folio::dataset::StaticDataset;
use folio::error::{FolioError, Result};
use folio::model::Lang;
use folio::notes::NoteService;
use folio::store::fs::FileStore;
use folio::sync::GitHubClient;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, NoteFields};
use print::{print_categories, print_config, print_messages, print_note, print_notes};

const STORE_DIR_ENV: &str = "FOLIO_STORE_DIR";
const TOKEN_ENV: &str = "FOLIO_GITHUB_TOKEN";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut api = init_api(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            category,
            categories,
        }) => handle_list(&api, search, category, categories),
        Some(Commands::View { note, lang, remote }) => handle_view(&api, &note, lang, remote).await,
        Some(Commands::Create { fields }) => handle_create(&mut api, fields),
        Some(Commands::Edit {
            note,
            fields,
            clear_tags,
        }) => handle_edit(&mut api, &note, fields, clear_tags),
        Some(Commands::Delete { notes }) => handle_delete(&mut api, &notes),
        Some(Commands::Export { output }) => handle_export(&api, output.as_deref()),
        Some(Commands::Prerender) => handle_prerender(&api),
        Some(Commands::Publish { message }) => handle_publish(&api, message.as_deref()).await,
        Some(Commands::Config { key, value }) => handle_config(&api, key, value),
        Some(Commands::Init) => handle_init(&api),
        None => handle_list(&api, None, None, false),
    }
}

fn init_api(cli: &Cli) -> Result<FolioApi<FileStore>> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let site_root = match &cli.site {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    let config_dir = site_root.join(".folio");
    let config = FolioConfig::load(&config_dir)?;

    let store_dir = resolve_store_dir(&site_root, &config)?;
    tracing::debug!(store = %store_dir.display(), "using overlay store");

    // Setup commands must work before the site has a dataset.
    let needs_dataset = !matches!(
        cli.command,
        Some(Commands::Init) | Some(Commands::Config { .. })
    );
    let dataset = if needs_dataset {
        StaticDataset::load(site_root.join(&config.dataset_path))?
    } else {
        StaticDataset::from_notes(Vec::new())
    };

    let service = NoteService::new(dataset, FileStore::new(store_dir.clone()));
    let paths = FolioPaths {
        config_dir,
        store_dir,
    };
    Ok(FolioApi::new(service, config, paths, site_root))
}

fn resolve_store_dir(site_root: &Path, config: &FolioConfig) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(STORE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.store_dir {
        return Ok(site_root.join(dir));
    }
    let dirs = ProjectDirs::from("dev", "folio", "folio")
        .ok_or_else(|| FolioError::Store("Could not determine a data directory".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn handle_list(
    api: &FolioApi<FileStore>,
    search: Option<String>,
    category: Option<String>,
    categories: bool,
) -> Result<()> {
    if categories {
        let result = api.categories()?;
        print_categories(&result.categories);
        return Ok(());
    }
    let result = api.list_notes(&NoteFilter { search, category })?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

async fn handle_view(
    api: &FolioApi<FileStore>,
    key: &str,
    lang: Lang,
    remote: bool,
) -> Result<()> {
    let source: Box<dyn ContentSource + Send + Sync> = if remote {
        Box::new(HttpContentSource::new(&api.settings().site.url)?)
    } else {
        Box::new(api.local_content_source())
    };
    let result = api.view_note(key, source.as_ref()).await?;
    if let Some(note) = result.listed_notes.first() {
        print_note(note, result.content.as_ref(), lang);
    }
    print_messages(&result.messages);
    Ok(())
}

fn draft_from(fields: NoteFields, clear_tags: bool) -> NoteDraft {
    NoteDraft {
        title_zh: fields.title_zh,
        title_en: fields.title_en,
        category: fields.category,
        date: fields.date,
        author: fields.author,
        read_time: fields.read_time,
        tags: fields.tags,
        clear_tags,
        summary_zh: fields.summary_zh,
        summary_en: fields.summary_en,
        content: fields.content,
        content_zh: fields.content_zh,
        content_en: fields.content_en,
    }
}

fn handle_create(api: &mut FolioApi<FileStore>, fields: NoteFields) -> Result<()> {
    let result = api.create_note(draft_from(fields, false))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    api: &mut FolioApi<FileStore>,
    key: &str,
    fields: NoteFields,
    clear_tags: bool,
) -> Result<()> {
    let result = api.update_note(key, draft_from(fields, clear_tags))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut FolioApi<FileStore>, keys: &[String]) -> Result<()> {
    let result = api.delete_notes(keys)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(api: &FolioApi<FileStore>, output: Option<&Path>) -> Result<()> {
    let result = api.export_notes(output)?;
    if let Some(json) = &result.output {
        println!("{}", json);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_prerender(api: &FolioApi<FileStore>) -> Result<()> {
    let result = api.prerender()?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_publish(api: &FolioApi<FileStore>, message: Option<&str>) -> Result<()> {
    let token = std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| FolioError::Validation(format!("{} is not set", TOKEN_ENV)))?;
    let client = GitHubClient::new(token);
    let result = api.publish(&client, message).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &FolioApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(api: &FolioApi<FileStore>) -> Result<()> {
    let result = api.init()?;
    print_messages(&result.messages);
    Ok(())
}
