use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; the wire form uses the
/// human-readable labels (`"Pending"`, `"In Progress"`, `"Completed"`).
/// Any other label fails deserialization, which surfaces as a 400.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// The `user_id` field of task creation accepts either a single id or a
/// list of ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UserIdSelector {
    One(i32),
    Many(Vec<i32>),
}

impl UserIdSelector {
    pub fn into_vec(self) -> Vec<i32> {
        match self {
            UserIdSelector::One(id) => vec![id],
            UserIdSelector::Many(ids) => ids,
        }
    }
}

/// Input payload for `POST /task/`.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    /// Free-form label such as "Bug" or "Feature".
    #[validate(length(min = 1, max = 20))]
    pub task_type: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Initial assignees; every id must reference an existing user.
    pub user_id: Option<UserIdSelector>,
}

/// Input payload for `POST /tasks/{task_id}/assign/`.
#[derive(Debug, Deserialize)]
pub struct AssignmentInput {
    pub user_ids: Vec<i32>,
}

/// A task row as stored and as returned by the API. Assignees live in the
/// `task_assignments` join table and are attached separately where a
/// response needs them.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub task_type: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A task together with its assignee ids, the shape returned by task
/// creation.
#[derive(Debug, Serialize)]
pub struct TaskWithAssignees {
    #[serde(flatten)]
    pub task: Task,
    pub assigned_user_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_labels() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let status: TaskStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(status, TaskStatus::Pending);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<TaskStatus, _> = serde_json::from_str("\"Archived\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let input: TaskInput = serde_json::from_value(serde_json::json!({
            "name": "Fix login page",
            "description": "The login form 500s on submit",
            "task_type": "Bug"
        }))
        .unwrap();
        assert_eq!(input.status, TaskStatus::Pending);
        assert!(input.user_id.is_none());
    }

    #[test]
    fn test_user_id_accepts_single_or_list() {
        let single: TaskInput = serde_json::from_value(serde_json::json!({
            "name": "t",
            "description": "d",
            "task_type": "Bug",
            "user_id": 3
        }))
        .unwrap();
        assert_eq!(single.user_id.unwrap().into_vec(), vec![3]);

        let many: TaskInput = serde_json::from_value(serde_json::json!({
            "name": "t",
            "description": "d",
            "task_type": "Bug",
            "user_id": [1, 2]
        }))
        .unwrap();
        assert_eq!(many.user_id.unwrap().into_vec(), vec![1, 2]);
    }

    #[test]
    fn test_task_input_validation() {
        let valid = TaskInput {
            name: "Fix login page".to_string(),
            description: "The login form 500s on submit".to_string(),
            task_type: "Bug".to_string(),
            status: TaskStatus::Pending,
            user_id: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = TaskInput {
            name: "".to_string(),
            description: "d".to_string(),
            task_type: "Bug".to_string(),
            status: TaskStatus::Pending,
            user_id: None,
        };
        assert!(empty_name.validate().is_err());

        let long_name = TaskInput {
            name: "a".repeat(256),
            description: "d".to_string(),
            task_type: "Bug".to_string(),
            status: TaskStatus::Pending,
            user_id: None,
        };
        assert!(long_name.validate().is_err());
    }
}
