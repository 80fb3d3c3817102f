//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use td_core::auth::{InMemoryPermissionChecker, Permission};
use td_core::clock::SystemClock;
use td_core::notify::{NoopEmailSender, TracingNotificationPublisher};
use td_core::task::{FileTaskStore, NullTaskCache, TaskService};
use td_core::user::{FileUserStore, UserId};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tasks: TaskService,
}

impl AppState {
    /// Create a new AppState with the given data directory.
    ///
    /// `admins` are granted the task permissions up front; everyone else
    /// starts with none.
    pub async fn new(data_dir: PathBuf, admins: &[UserId]) -> td_core::Result<Self> {
        let task_store = Arc::new(FileTaskStore::new(data_dir.join("tasks.json")).await?);
        let user_store = Arc::new(FileUserStore::new(data_dir.join("users.json")).await?);

        let permissions = Arc::new(InMemoryPermissionChecker::new());
        for &admin in admins {
            permissions
                .grant(admin, Permission::AssignTaskToOthers)
                .await;
            permissions.grant(admin, Permission::DeleteTasks).await;
        }

        let tasks = TaskService::new(
            task_store,
            user_store,
            permissions,
            Arc::new(TracingNotificationPublisher),
            Arc::new(NoopEmailSender),
            Arc::new(NullTaskCache),
            Arc::new(SystemClock),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { tasks }),
        })
    }

    /// Get reference to the task service
    pub fn tasks(&self) -> &TaskService {
        &self.inner.tasks
    }
}
