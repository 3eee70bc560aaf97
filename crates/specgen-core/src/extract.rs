//! Best-effort recovery of a JSON object from free-form model output.
//!
//! The model is asked for bare JSON but may wrap it in prose or code fences.
//! The span from the first `{` to the last `}` is taken as the candidate;
//! with no such span the whole text is tried. Two separate objects in one
//! reply therefore fail to parse.

use crate::error::{Result, SpecError};
use crate::types::TaskSet;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static OUTER_BRACES_RE: OnceLock<Regex> = OnceLock::new();

fn outer_braces_re() -> &'static Regex {
    OUTER_BRACES_RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"))
}

/// Extract and parse the outermost `{ ... }` span of `text`.
pub fn extract_json_object(text: &str) -> Result<Value> {
    let candidate = outer_braces_re()
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or(text);
    serde_json::from_str(candidate.trim()).map_err(|e| SpecError::Parse(e.to_string()))
}

/// Parse a model reply into a [`TaskSet`]. Missing lists become empty; a
/// non-object payload or a list of the wrong shape is a parse error.
pub fn parse_task_set(text: &str) -> Result<TaskSet> {
    let value = extract_json_object(text)?;
    let Value::Object(mut map) = value else {
        return Err(SpecError::Parse("expected a JSON object".to_string()));
    };
    map.retain(|_, v| !v.is_null());
    serde_json::from_value(Value::Object(map)).map_err(|e| SpecError::Parse(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
