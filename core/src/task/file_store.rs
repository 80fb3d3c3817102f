//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{Task, TaskId};
use super::query::{TaskFilter, TaskQuery};
use super::store::TaskStore;
use crate::{Error, Result};

/// File-based task store using JSON.
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory state of tasks
    state: RwLock<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    next_id: TaskId,
    tasks: HashMap<TaskId, Task>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: HashMap::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    next_id: TaskId,
    tasks: Vec<Task>,
}

impl From<StoredTasks> for StoreState {
    fn from(stored: StoredTasks) -> Self {
        Self {
            next_id: stored.next_id.max(1),
            tasks: stored.tasks.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl From<&StoreState> for StoredTasks {
    fn from(state: &StoreState) -> Self {
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(|t| t.id);
        Self {
            next_id: state.next_id,
            tasks,
        }
    }
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let stored: StoredTasks = serde_json::from_str(&content)?;
            stored.into()
        } else {
            StoreState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Persist the state to disk
    async fn persist(&self) -> Result<()> {
        let state = self.state.read().await;
        let content = serde_json::to_string_pretty(&StoredTasks::from(&*state))?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Matching tasks in store order (ascending id).
    fn matching(state: &StoreState, filter: &TaskFilter) -> Vec<Task> {
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        tasks
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        Ok(Self::matching(&state, &TaskFilter::default()))
    }

    async fn find(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        let mut tasks = Self::matching(&state, &query.filter);
        // Stable sort on top of store order so ties keep their relative
        // position.
        tasks.sort_by(|a, b| query.sort.compare(a, b));

        if let Some(page) = query.page {
            tasks = tasks.into_iter().skip(page.skip).take(page.take).collect();
        }
        Ok(tasks)
    }

    async fn count(&self, filter: &TaskFilter) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.tasks.values().filter(|t| filter.matches(t)).count())
    }

    async fn insert_and_get_id(&self, mut task: Task) -> Result<TaskId> {
        let id = {
            let mut state = self.state.write().await;
            let id = state.next_id;
            state.next_id += 1;
            task.id = id;
            state.tasks.insert(id, task);
            id
        };
        self.persist().await?;
        Ok(id)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        {
            let mut state = self.state.write().await;
            if !state.tasks.contains_key(&task.id) {
                return Err(Error::TaskNotFound(task.id));
            }
            state.tasks.insert(task.id, task.clone());
        }
        self.persist().await?;
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let removed = {
            let mut state = self.state.write().await;
            state.tasks.remove(&id).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }
}
