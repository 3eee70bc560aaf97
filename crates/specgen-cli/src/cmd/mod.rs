pub mod config;
pub mod export;
pub mod generate;
pub mod history;
pub mod serve;

use anyhow::Context;
use specgen_core::config::Config;
use std::path::Path;

/// Load `specgen.yaml` under `root` and apply the `--provider` override.
pub fn load_config(root: &Path, provider: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::load(root).context("failed to load specgen.yaml")?;
    Ok(config.with_provider_override(provider)?)
}
