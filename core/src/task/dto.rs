//! Transport shapes for the task operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Task, TaskId, TaskState};
use super::query::{TaskFilter, TaskSort};
use crate::user::UserId;

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: TaskId,
    pub title: String,
    pub state: TaskState,
    pub assigned_person_id: Option<UserId>,
    pub creation_time: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            state: task.state,
            assigned_person_id: task.assigned_person_id,
            creation_time: task.creation_time,
        }
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default)]
    pub state: Option<TaskState>,
    #[serde(default)]
    pub assigned_person_id: Option<UserId>,
}

/// Input for updating a task. Absent fields leave the stored value as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(default)]
    pub id: TaskId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state: Option<TaskState>,
    #[serde(default)]
    pub assigned_person_id: Option<UserId>,
}

/// Filter, sort, and paging parameters for the query operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksInput {
    #[serde(default)]
    pub state: Option<TaskState>,
    /// Case-sensitive substring to look for in task titles.
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub assigned_person_id: Option<UserId>,
    /// `"<field> [asc|desc]"`. Unrecognized expressions fall back to the
    /// default creation-time-descending order.
    #[serde(default)]
    pub sorting: Option<String>,
    /// Used by the paged listing only.
    #[serde(default)]
    pub skip_count: usize,
    /// Used by the paged listing only.
    #[serde(default = "default_max_result_count")]
    pub max_result_count: usize,
}

fn default_max_result_count() -> usize {
    10
}

impl Default for GetTasksInput {
    fn default() -> Self {
        Self {
            state: None,
            filter: None,
            assigned_person_id: None,
            sorting: None,
            skip_count: 0,
            max_result_count: default_max_result_count(),
        }
    }
}

impl GetTasksInput {
    /// The conjunctive filter described by the present parts of the input.
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter {
            state: self.state,
            title_contains: self
                .filter
                .as_deref()
                .filter(|needle| !needle.is_empty())
                .map(str::to_string),
            assigned_person_id: self.assigned_person_id,
        }
    }

    /// The requested sort order, or the default when the expression is
    /// absent or not recognized.
    pub fn to_sort(&self) -> TaskSort {
        self.sorting
            .as_deref()
            .and_then(TaskSort::parse)
            .unwrap_or_default()
    }
}

/// Result envelope for the non-paged listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksOutput {
    pub tasks: Vec<TaskDto>,
}

/// One page of results plus the filtered total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedTasksResult<T> {
    pub total_count: usize,
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::super::query::{SortDirection, TaskSortField};
    use super::*;

    #[test]
    fn empty_title_filter_is_treated_as_absent() {
        let input = GetTasksInput {
            filter: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(input.to_filter().title_contains, None);
    }

    #[test]
    fn unrecognized_sorting_falls_back_to_default() {
        let input = GetTasksInput {
            sorting: Some("priority desc".to_string()),
            ..Default::default()
        };
        assert_eq!(input.to_sort(), TaskSort::CREATION_TIME_DESC);
    }

    #[test]
    fn sorting_expression_is_honored() {
        let input = GetTasksInput {
            sorting: Some("title desc".to_string()),
            ..Default::default()
        };
        let sort = input.to_sort();
        assert_eq!(sort.field, TaskSortField::Title);
        assert_eq!(sort.direction, SortDirection::Descending);
    }
}
