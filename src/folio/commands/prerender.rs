use crate::commands::{CmdMessage, CmdResult};
use crate::config::FolioConfig;
use crate::dataset::StaticDataset;
use crate::error::Result;
use crate::prerender::{prerender, PrerenderOptions};
use std::path::Path;

/// Prerender link-preview pages for the static dataset. Paths in the config
/// are taken relative to `site_root`.
pub fn run(dataset: &StaticDataset, config: &FolioConfig, site_root: &Path) -> Result<CmdResult> {
    let opts = PrerenderOptions {
        dist_dir: site_root.join(&config.dist_dir),
        posts_dir: Some(site_root.join(&config.posts_dir)),
        site_name: config.site.name.clone(),
        site_url: config.site.url.clone(),
        default_image: config.site.default_image.clone(),
    };

    let written = prerender(&dataset.normalized(), &opts)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Prerendered {} of {} notes into {}",
        written.len(),
        dataset.len(),
        opts.dist_dir.display()
    )));
    Ok(result.with_written_paths(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawNote;
    use crate::store::memory::fixtures::note;
    use std::fs;

    #[test]
    fn renders_into_configured_dist() {
        let site = tempfile::tempdir().unwrap();
        fs::create_dir_all(site.path().join("dist")).unwrap();
        fs::write(
            site.path().join("dist/index.html"),
            "<html><head><title>Site</title></head></html>",
        )
        .unwrap();

        let dataset = StaticDataset::from_notes(vec![
            note(1, "Lumen Notes", "2024-01-01"),
            RawNote {
                title_zh: Some("無英文標題".into()),
                ..RawNote::new(2)
            },
        ]);
        let mut config = FolioConfig::default();
        config.site.name = "Annie".into();

        let result = run(&dataset, &config, site.path()).unwrap();

        assert_eq!(result.written_paths.len(), 1);
        let html = fs::read_to_string(site.path().join("dist/notes/lumen-notes/index.html"))
            .unwrap();
        assert!(html.contains("<title>Lumen Notes | Annie</title>"));
    }

    #[test]
    fn missing_build_is_an_error() {
        let site = tempfile::tempdir().unwrap();
        let dataset = StaticDataset::from_notes(vec![note(1, "A", "2024-01-01")]);
        let err = run(&dataset, &FolioConfig::default(), site.path()).unwrap_err();
        assert!(err.to_string().contains("Build the site first"));
    }
}
