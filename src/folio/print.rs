use chrono::{Local, NaiveDate};
use colored::*;
use folio::api::{CmdMessage, MessageLevel};
use folio::config::FolioConfig;
use folio::model::{Lang, Note, NoteContent};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const CATEGORY_WIDTH: usize = 20;
const TIME_WIDTH: usize = 16;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for note in notes {
        let id = format!("{:>width$}. ", note.id, width = ID_WIDTH - 2);
        let category = pad_to_width(
            &truncate_to_width(&note.category, CATEGORY_WIDTH - 1),
            CATEGORY_WIDTH,
        );
        let when = format_date_ago(&note.date);

        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + CATEGORY_WIDTH + TIME_WIDTH);
        let title = truncate_to_width(&note.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}{}{}",
            id.yellow(),
            category.cyan(),
            title,
            " ".repeat(padding),
            when.dimmed()
        );
    }
}

pub fn print_note(note: &Note, content: Option<&NoteContent>, lang: Lang) {
    println!(
        "{} {}",
        format!("#{}", note.id).yellow(),
        note.localized_title(lang).bold()
    );
    let mut meta = vec![note.slug.clone(), note.category.clone(), note.date.clone()];
    if !note.read_time.is_empty() {
        meta.push(note.read_time.clone());
    }
    meta.retain(|m| !m.is_empty());
    println!("{}", meta.join(" · ").dimmed());
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{}", tags.join(" ").cyan());
    }
    if !note.summary.is_empty() {
        println!("\n{}", note.summary.italic());
    }
    if let Some(content) = content {
        println!("--------------------------------");
        println!("{}", content.localized(lang));
    }
}

pub fn print_categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!("{}", category);
    }
}

pub fn print_config(config: &FolioConfig) {
    for key in folio::config::SETTABLE_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
    match &config.github {
        Some(github) => println!(
            "github = {}/{}@{}",
            github.owner, github.repo, github.branch
        ),
        None => println!("{}", "github = (not configured)".dimmed()),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

/// Relative age of a `YYYY-MM-DD` date; other values are shown as they are.
fn format_date_ago(date: &str) -> String {
    let formatted = match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(day) => {
            let days = (Local::now().date_naive() - day).num_days();
            if days <= 0 {
                "today".to_string()
            } else {
                let formatter = timeago::Formatter::new();
                formatter.convert(std::time::Duration::from_secs(days as u64 * 86_400))
            }
        }
        Err(_) => date.to_string(),
    };
    format!("{:>width$}", formatted, width = TIME_WIDTH)
}
