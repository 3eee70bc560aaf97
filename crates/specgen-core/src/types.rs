use crate::error::{Result, SpecError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// A feature description submitted for task generation.
///
/// Every field defaults when absent or `null` so that a missing value is
/// reported by [`GenerationRequest::validate`] rather than rejected at
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub goal: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub users: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub constraints: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risks: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        goal: impl Into<String>,
        users: impl Into<String>,
        constraints: impl Into<String>,
    ) -> Self {
        Self {
            goal: goal.into(),
            users: users.into(),
            constraints: constraints.into(),
            risks: None,
        }
    }

    pub fn with_risks(mut self, risks: impl Into<String>) -> Self {
        self.risks = Some(risks.into());
        self
    }

    /// Require `goal`, `users`, and `constraints` to be non-blank.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("goal", &self.goal),
            ("users", &self.users),
            ("constraints", &self.constraints),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SpecError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Risks, with a blank value treated as absent.
    pub fn risks(&self) -> Option<&str> {
        self.risks.as_deref().filter(|r| !r.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Task / TaskSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub title: String,
    pub description: String,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The two ordered task lists produced by one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskSet {
    pub user_stories: Vec<Task>,
    pub engineering_tasks: Vec<Task>,
}

impl TaskSet {
    pub fn is_empty(&self) -> bool {
        self.user_stories.is_empty() && self.engineering_tasks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SpecRecord / SpecSummary
// ---------------------------------------------------------------------------

/// One persisted generation result. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub goal: String,
    pub users: String,
    pub constraints: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<String>,
    #[serde(default)]
    pub tasks: TaskSet,
}

impl SpecRecord {
    /// Build a record from a validated request. The caller supplies the id.
    pub fn from_request(
        id: String,
        created_at: DateTime<Utc>,
        request: &GenerationRequest,
        tasks: TaskSet,
    ) -> Self {
        Self {
            id,
            created_at,
            goal: request.goal.clone(),
            users: request.users.clone(),
            constraints: request.constraints.clone(),
            risks: request.risks().map(str::to_string),
            tasks,
        }
    }

    pub fn summary(&self) -> SpecSummary {
        SpecSummary {
            id: self.id.clone(),
            created_at: self.created_at,
            goal: self.goal.clone(),
            users: self.users.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

/// History list projection: no `risks`, no `tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub goal: String,
    pub users: String,
    pub constraints: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
