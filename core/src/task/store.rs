//! Task store trait
//!
//! Defines the interface for task persistence and its query surface.

use async_trait::async_trait;

use super::model::{Task, TaskId};
use super::query::{TaskFilter, TaskQuery};
use crate::Result;

/// Persistence interface for task records.
///
/// Filtering, sorting, and paging are pushed down so implementations can
/// translate them to their native query surface.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Get a task by id.
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// All tasks in store order.
    async fn get_all(&self) -> Result<Vec<Task>>;

    /// Tasks matching the query, sorted, and sliced to its page if any.
    async fn find(&self, query: &TaskQuery) -> Result<Vec<Task>>;

    /// Number of tasks matching the filter, ignoring pagination.
    async fn count(&self, filter: &TaskFilter) -> Result<usize>;

    /// Insert a new task and return the id assigned to it.
    async fn insert_and_get_id(&self, task: Task) -> Result<TaskId>;

    /// Overwrite an existing task.
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task by id, returning whether a record was removed.
    async fn delete(&self, id: TaskId) -> Result<bool>;
}
