pub mod init;
pub mod inspect;
pub mod levels;
pub mod play;
pub mod review;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use flashcourt_core::level::QuizMode;
use flashcourt_data::config::{load_config_from, FlashcourtConfig};

/// Load the config file and apply command-line overrides on top.
pub fn resolve_config(
    config_path: Option<&Path>,
    source: Option<String>,
    mode: Option<String>,
    seed: Option<u64>,
) -> Result<FlashcourtConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(source) = source {
        config.source = source;
    }
    if let Some(mode) = mode {
        config.mode = mode.parse::<QuizMode>().map_err(anyhow::Error::msg)?;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
