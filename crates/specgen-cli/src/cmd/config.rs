use crate::output::print_json;
use clap::Subcommand;
use specgen_core::config::{Config, WarnLevel};
use specgen_core::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a specgen.yaml with default values (no-op if one exists)
    Init,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    provider: Option<&str>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, provider, json),
        ConfigSubcommand::Validate => validate(root, provider, json),
        ConfigSubcommand::Init => init(root),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, provider: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, provider)?;
    let credential_set = config.provider.credential_from_env().is_some();

    if json {
        return print_json(&serde_json::json!({
            "provider": config.provider,
            "model": config.effective_model(),
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
            "base_url": config.base_url,
            "timeout_secs": config.timeout_secs,
            "history_path": config.specs_path(root),
            "credential_set": credential_set,
        }));
    }

    println!("provider:     {}", config.provider);
    println!("model:        {}", config.effective_model());
    println!("temperature:  {}", config.temperature);
    println!("max_tokens:   {}", config.max_tokens);
    println!(
        "base_url:     {}",
        config
            .base_url
            .as_deref()
            .unwrap_or(config.provider.default_base_url())
    );
    println!("timeout_secs: {}", config.timeout_secs);
    println!("history:      {}", config.specs_path(root).display());
    println!(
        "credential:   {} ({})",
        if credential_set { "set" } else { "missing" },
        config.provider.credential_vars().join(" or ")
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, provider: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, provider)?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if path.exists() {
        println!("{} already exists", path.display());
        return Ok(());
    }
    Config::default().save(root)?;
    println!("Wrote {}", path.display());
    Ok(())
}
