//! Task module
//!
//! Task entity, transport shapes, the query model, and the application
//! service operating on them.

mod cache;
mod dto;
mod file_store;
mod model;
mod query;
mod service;
mod store;

pub use cache::{NullTaskCache, TaskCache, TaskCacheItem};
pub use dto::{
    CreateTaskInput, GetTasksInput, GetTasksOutput, PagedTasksResult, TaskDto, UpdateTaskInput,
};
pub use file_store::FileTaskStore;
pub use model::{Task, TaskId, TaskState};
pub use query::{Page, SortDirection, TaskFilter, TaskQuery, TaskSort, TaskSortField};
pub use service::TaskService;
pub use store::TaskStore;
