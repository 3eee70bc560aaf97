use crate::output::print_json;
use anyhow::Result;
use specgen_core::export;
use specgen_core::types::GenerationRequest;
use specgen_server::AppState;
use std::path::Path;

pub fn run(
    root: &Path,
    provider: Option<&str>,
    goal: String,
    users: String,
    constraints: String,
    risks: Option<String>,
    json: bool,
) -> Result<()> {
    let request = GenerationRequest {
        goal,
        users,
        constraints,
        risks,
    };
    // Fail on bad input before building a client or a runtime.
    request.validate()?;

    let config = super::load_config(root, provider)?;
    let state = AppState::from_config(root.to_path_buf(), config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let record = rt.block_on(specgen_server::pipeline::generate(&state, request))?;

    if json {
        print_json(&record)?;
    } else {
        println!("Recorded spec {}\n", record.id);
        print!("{}", export::to_markdown(&record));
    }
    Ok(())
}
