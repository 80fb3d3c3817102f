//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Identifier of a task record, assigned by the store on insert.
pub type TaskId = i32;

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Open,
    Active,
    Completed,
}

impl Default for TaskState {
    fn default() -> Self {
        Self::Open
    }
}

/// A task under management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub state: TaskState,
    pub assigned_person_id: Option<UserId>,
    pub creation_time: DateTime<Utc>,
}

impl Task {
    /// Create a task with the given title. The id stays zero until the
    /// store assigns one on insert.
    pub fn new(title: impl Into<String>, creation_time: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            state: TaskState::default(),
            assigned_person_id: None,
            creation_time,
        }
    }

    /// Set the state
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Set the assignee
    pub fn with_assigned_person(mut self, user_id: UserId) -> Self {
        self.assigned_person_id = Some(user_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new("Test task", Utc::now());
        assert_eq!(task.id, 0);
        assert_eq!(task.title, "Test task");
        assert_eq!(task.state, TaskState::Open);
        assert!(task.assigned_person_id.is_none());
    }

    #[test]
    fn test_task_with_state() {
        let task = Task::new("Test task", Utc::now()).with_state(TaskState::Active);
        assert_eq!(task.state, TaskState::Active);
    }

    #[test]
    fn test_task_with_assigned_person() {
        let task = Task::new("Test task", Utc::now()).with_assigned_person(42);
        assert_eq!(task.assigned_person_id, Some(42));
    }
}
