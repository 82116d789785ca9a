use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a task entity as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task (document id, hex string).
    #[serde(rename = "_id")]
    pub id: String,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier of the user who owns the task.
    pub owner_id: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInput {
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update for a task. Fields left unset are not sent and keep their
/// server-side value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_deserialization() {
        let body = r#"{
            "_id": "65f0c1d2e3a4b5c6d7e8f901",
            "title": "Write report",
            "description": "Quarterly numbers",
            "owner_id": "65f0c1d2e3a4b5c6d7e8f900",
            "created_at": "2024-03-12T09:30:00Z"
        }"#;

        let task: Task = serde_json::from_str(body).unwrap();
        assert_eq!(task.id, "65f0c1d2e3a4b5c6d7e8f901");
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(task.owner_id, "65f0c1d2e3a4b5c6d7e8f900");
    }

    #[test]
    fn test_task_missing_description() {
        let body = r#"{
            "_id": "65f0c1d2e3a4b5c6d7e8f901",
            "title": "Untitled work",
            "owner_id": "65f0c1d2e3a4b5c6d7e8f900",
            "created_at": "2024-03-12T09:30:00Z"
        }"#;

        let task: Task = serde_json::from_str(body).unwrap();
        assert!(task.description.is_none());
    }

    #[test]
    fn test_task_update_skips_unset_fields() {
        let update = TaskUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"title":"Renamed"}"#
        );

        let empty = TaskUpdate::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }
}
