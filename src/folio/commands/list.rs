use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Note;
use crate::notes::NoteService;
use crate::store::OverlayStore;

#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring of any title or tag
    pub search: Option<String>,
    /// Case-insensitive category name
    pub category: Option<String>,
}

impl NoteFilter {
    fn matches(&self, note: &Note) -> bool {
        let category_ok = match &self.category {
            Some(cat) => note.category.to_lowercase() == cat.to_lowercase(),
            None => true,
        };

        let search_ok = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                [
                    Some(&note.title),
                    note.title_zh.as_ref(),
                    note.title_en.as_ref(),
                ]
                .into_iter()
                .flatten()
                .any(|t| t.to_lowercase().contains(&term))
                    || note.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
            None => true,
        };

        category_ok && search_ok
    }
}

pub fn run<S: OverlayStore>(service: &NoteService<S>, filter: &NoteFilter) -> Result<CmdResult> {
    let notes: Vec<Note> = service
        .get_notes()?
        .into_iter()
        .filter(|n| filter.matches(n))
        .collect();
    Ok(CmdResult::default().with_listed_notes(notes))
}

pub fn categories<S: OverlayStore>(service: &NoteService<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.categories = service.categories()?;
    Ok(result)
}
