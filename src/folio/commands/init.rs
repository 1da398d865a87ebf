use crate::commands::{CmdMessage, CmdResult, FolioPaths};
use crate::config::FolioConfig;
use crate::error::Result;

/// Write a default `config.json` unless one already exists.
pub fn run(paths: &FolioPaths) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let config_file = paths.config_dir.join("config.json");

    if config_file.exists() {
        result.add_message(CmdMessage::info(format!(
            "Already initialized: {}",
            config_file.display()
        )));
        return Ok(result.with_config(FolioConfig::load(&paths.config_dir)?));
    }

    let config = FolioConfig::default();
    config.save(&paths.config_dir)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized {}",
        config_file.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Overlay edits are kept in {}",
        paths.store_dir.display()
    )));
    Ok(result.with_config(config))
}
