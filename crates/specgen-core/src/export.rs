use crate::error::SpecError;
use crate::types::{SpecRecord, Task};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(SpecError::InvalidFormat(other.to_string())),
        }
    }
}

pub fn render(record: &SpecRecord, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => to_markdown(record),
        ExportFormat::Text => to_text(record),
    }
}

/// Markdown document: feature details then numbered story and task lists.
/// Empty sections are skipped.
pub fn to_markdown(record: &SpecRecord) -> String {
    let mut out = format!("# Tasks for: {}\n\n", record.goal);
    out.push_str("## Feature Details\n");
    let _ = writeln!(out, "- **Goal**: {}", record.goal);
    let _ = writeln!(out, "- **Users**: {}", record.users);
    let _ = writeln!(out, "- **Constraints**: {}", record.constraints);
    if let Some(risks) = &record.risks {
        let _ = writeln!(out, "- **Risks**: {risks}");
    }
    out.push('\n');

    md_section(&mut out, "User Stories", &record.tasks.user_stories);
    md_section(&mut out, "Engineering Tasks", &record.tasks.engineering_tasks);
    out
}

fn md_section(out: &mut String, heading: &str, items: &[Task]) {
    if items.is_empty() {
        return;
    }
    let _ = write!(out, "## {heading}\n\n");
    for (idx, task) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. **{}**", idx + 1, task.title);
        let _ = write!(out, "   {}\n\n", task.description);
    }
}

/// Plain-text document with ruled section headers.
pub fn to_text(record: &SpecRecord) -> String {
    let mut out = format!("TASKS FOR: {}\n", record.goal);
    let _ = write!(out, "{}\n\n", "=".repeat(RULE_WIDTH));
    out.push_str("FEATURE DETAILS\n");
    let _ = writeln!(out, "Goal: {}", record.goal);
    let _ = writeln!(out, "Users: {}", record.users);
    let _ = writeln!(out, "Constraints: {}", record.constraints);
    if let Some(risks) = &record.risks {
        let _ = writeln!(out, "Risks: {risks}");
    }
    out.push('\n');

    text_section(&mut out, "USER STORIES", &record.tasks.user_stories);
    text_section(&mut out, "ENGINEERING TASKS", &record.tasks.engineering_tasks);
    out
}

fn text_section(out: &mut String, heading: &str, items: &[Task]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for (idx, task) in items.iter().enumerate() {
        let _ = write!(out, "{}. {}\n   {}\n\n", idx + 1, task.title, task.description);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
