use crate::prelude::{eprintln, *};
use std::path::PathBuf;

use postfeed_core::config::{load_config, Config};

const CONFIG_FILE: &str = "config.toml";

/// Directory holding config.toml and session.json
pub fn config_dir(global: &crate::Global) -> Result<PathBuf> {
    if let Some(dir) = &global.config_dir {
        return Ok(dir.clone());
    }

    dirs_next::config_dir()
        .map(|dir| dir.join("postfeed"))
        .ok_or_else(|| eyre!("Unable to determine config directory"))
}

/// Load config.toml and apply the global CLI/environment overrides
pub fn load(global: &crate::Global) -> Result<Config> {
    let path = config_dir(global)?.join(CONFIG_FILE);
    log::debug!("loading configuration from {}", path.display());

    let config = load_config(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let config = config.with_overrides(global.api_url.clone(), global.page_size)?;

    if global.verbose {
        eprintln!("API base: {}", config.base_url());
        eprintln!("Page size: {}", config.page_size);
        eprintln!();
    }

    Ok(config)
}
