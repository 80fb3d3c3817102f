//! Filter, sort, and page model shared by the query operations

use std::cmp::Ordering;

use super::model::{Task, TaskState};
use crate::user::UserId;

/// Conjunctive filter over tasks; each part is applied only when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact state match.
    pub state: Option<TaskState>,
    /// Case-sensitive substring match on the title.
    pub title_contains: Option<String>,
    /// Exact assignee match.
    pub assigned_person_id: Option<UserId>,
}

impl TaskFilter {
    /// Whether the task matches every supplied part.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(state) = self.state {
            if task.state != state {
                return false;
            }
        }
        if let Some(needle) = &self.title_contains {
            if !task.title.contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(person) = self.assigned_person_id {
            if task.assigned_person_id != Some(person) {
                return false;
            }
        }
        true
    }
}

/// Fields a task listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Id,
    Title,
    State,
    CreationTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order over the enumerated set of sortable fields.
///
/// Sort expressions such as `"title desc"` parse into a `TaskSort`.
/// Unrecognized fields or directions are rejected so callers fall back to
/// the default order instead of evaluating arbitrary expressions against
/// the record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: TaskSortField,
    pub direction: SortDirection,
}

impl TaskSort {
    pub const CREATION_TIME_DESC: Self = Self {
        field: TaskSortField::CreationTime,
        direction: SortDirection::Descending,
    };

    /// Parse a `"<field> [asc|desc]"` expression; `None` when not recognized.
    pub fn parse(expression: &str) -> Option<Self> {
        let mut parts = expression.split_whitespace();

        let field = match parts.next()?.to_ascii_lowercase().as_str() {
            "id" => TaskSortField::Id,
            "title" => TaskSortField::Title,
            "state" => TaskSortField::State,
            "creation_time" | "creationtime" => TaskSortField::CreationTime,
            _ => return None,
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self { field, direction })
    }

    /// Compare two tasks under the configured field and direction.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.field {
            TaskSortField::Id => a.id.cmp(&b.id),
            TaskSortField::Title => a.title.cmp(&b.title),
            TaskSortField::State => (a.state as u8).cmp(&(b.state as u8)),
            TaskSortField::CreationTime => a.creation_time.cmp(&b.creation_time),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for TaskSort {
    fn default() -> Self {
        Self::CREATION_TIME_DESC
    }
}

/// Skip/take slice applied after filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub take: usize,
}

/// A complete query: filter, sort, and an optional page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    pub sort: TaskSort,
    pub page: Option<Page>,
}

impl TaskQuery {
    pub fn new(filter: TaskFilter, sort: TaskSort) -> Self {
        Self {
            filter,
            sort,
            page: None,
        }
    }

    pub fn with_page(mut self, skip: usize, take: usize) -> Self {
        self.page = Some(Page { skip, take });
        self
    }
}
