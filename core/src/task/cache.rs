//! Task cache lookup contract

use serde::{Deserialize, Serialize};

use super::model::{Task, TaskId, TaskState};
use crate::user::UserId;

/// Snapshot of a task as held by an external cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCacheItem {
    pub id: TaskId,
    pub title: String,
    pub state: TaskState,
    pub assigned_person_id: Option<UserId>,
}

impl From<&Task> for TaskCacheItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            state: task.state,
            assigned_person_id: task.assigned_person_id,
        }
    }
}

/// Indexed lookup into an externally populated task cache.
///
/// Population and eviction are owned by the cache, not by this crate.
pub trait TaskCache: Send + Sync {
    fn get(&self, id: TaskId) -> Option<TaskCacheItem>;
}

/// Cache that always misses.
#[derive(Debug, Default)]
pub struct NullTaskCache;

impl TaskCache for NullTaskCache {
    fn get(&self, _id: TaskId) -> Option<TaskCacheItem> {
        None
    }
}
