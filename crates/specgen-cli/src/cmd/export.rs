use anyhow::{Context, Result};
use specgen_core::export::{self, ExportFormat};
use std::path::Path;

pub fn run(
    root: &Path,
    provider: Option<&str>,
    id: &str,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let config = super::load_config(root, provider)?;
    let record = config.store(root).find(id)?;
    let rendered = export::render(&record, format);

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
