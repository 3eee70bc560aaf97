use crate::output::{print_json, print_table, truncate};
use anyhow::Result;
use specgen_core::export;
use std::path::Path;

const GOAL_WIDTH: usize = 48;

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

pub fn list(root: &Path, provider: Option<&str>, json: bool) -> Result<()> {
    let config = super::load_config(root, provider)?;
    let summaries = config.store(root).summaries();

    if json {
        return print_json(&summaries);
    }
    if summaries.is_empty() {
        println!("No specs yet. Run `specgen generate` to create one.");
        return Ok(());
    }

    let rows = summaries
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.created_at.format("%Y-%m-%d %H:%M").to_string(),
                truncate(&s.goal, GOAL_WIDTH),
                truncate(&s.users, 24),
            ]
        })
        .collect();
    print_table(&["ID", "CREATED", "GOAL", "USERS"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

pub fn show(root: &Path, provider: Option<&str>, id: &str, json: bool) -> Result<()> {
    let config = super::load_config(root, provider)?;
    let record = config.store(root).find(id)?;

    if json {
        print_json(&record)
    } else {
        println!(
            "{}  created {}\n",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M UTC")
        );
        print!("{}", export::to_markdown(&record));
        Ok(())
    }
}
