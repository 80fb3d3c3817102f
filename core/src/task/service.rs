//! Task application service
//!
//! All task-entity operations and their authorization and notification
//! side effects.

use std::sync::Arc;

use crate::auth::{Permission, PermissionChecker};
use crate::clock::Clock;
use crate::notify::{EmailSender, NotificationData, NotificationPublisher, NotificationSeverity};
use crate::session::Session;
use crate::user::{UserId, UserStore};
use crate::{Error, Result};

use super::cache::{TaskCache, TaskCacheItem};
use super::dto::{
    CreateTaskInput, GetTasksInput, GetTasksOutput, PagedTasksResult, TaskDto, UpdateTaskInput,
};
use super::model::{Task, TaskId};
use super::query::TaskQuery;
use super::store::TaskStore;

/// Event name published when a task is assigned at creation.
const NEW_TASK_EVENT: &str = "NewTask";

/// Application service for the task entity.
///
/// Holds no task state of its own; every operation goes through the
/// injected collaborators.
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    permissions: Arc<dyn PermissionChecker>,
    notifications: Arc<dyn NotificationPublisher>,
    email: Arc<dyn EmailSender>,
    cache: Arc<dyn TaskCache>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        permissions: Arc<dyn PermissionChecker>,
        notifications: Arc<dyn NotificationPublisher>,
        email: Arc<dyn EmailSender>,
        cache: Arc<dyn TaskCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tasks,
            users,
            permissions,
            notifications,
            email,
            cache,
            clock,
        }
    }

    /// Direct lookup into the cache collaborator. This flow never
    /// populates the cache, so misses are the norm.
    pub fn get_task_from_cache_by_id(&self, task_id: TaskId) -> Option<TaskCacheItem> {
        self.cache.get(task_id)
    }

    /// Every task, newest first.
    pub async fn get_all_tasks(&self) -> Result<Vec<TaskDto>> {
        let tasks = self.tasks.find(&TaskQuery::default()).await?;
        Ok(tasks.into_iter().map(TaskDto::from).collect())
    }

    /// Tasks matching the filters in `input`, sorted as requested.
    pub async fn get_tasks(&self, input: &GetTasksInput) -> Result<GetTasksOutput> {
        let query = TaskQuery::new(input.to_filter(), input.to_sort());
        let tasks = self.tasks.find(&query).await?;

        Ok(GetTasksOutput {
            tasks: tasks.into_iter().map(TaskDto::from).collect(),
        })
    }

    /// One page of matching tasks plus the total match count.
    ///
    /// The count is taken over the filtered set before the page is
    /// applied, never over the page slice.
    pub async fn get_paged_tasks(
        &self,
        input: &GetTasksInput,
    ) -> Result<PagedTasksResult<TaskDto>> {
        let query = TaskQuery::new(input.to_filter(), input.to_sort())
            .with_page(input.skip_count, input.max_result_count);

        let total_count = self.tasks.count(&query.filter).await?;
        let tasks = self.tasks.find(&query).await?;

        Ok(PagedTasksResult {
            total_count,
            items: tasks.into_iter().map(TaskDto::from).collect(),
        })
    }

    /// Fetch a single task by id.
    pub async fn get_task_by_id(&self, task_id: TaskId) -> Result<TaskDto> {
        let task = self
            .tasks
            .get(task_id)
            .await?
            .ok_or(Error::TaskNotFound(task_id))?;
        Ok(task.into())
    }

    /// Update a task, patching the provided fields onto the stored record.
    ///
    /// Assigning the task to someone other than the caller requires the
    /// assign-to-others permission; the check runs before any read or
    /// write of the record.
    pub async fn update_task(&self, session: &Session, input: UpdateTaskInput) -> Result<()> {
        tracing::info!(task_id = input.id, "updating task");

        if let Some(assignee) = input.assigned_person_id {
            let caller = session.user_id()?;
            if assignee != caller
                && !self
                    .permissions
                    .is_granted(caller, Permission::AssignTaskToOthers)
                    .await
            {
                return Err(Error::PermissionDenied(Permission::AssignTaskToOthers));
            }
        }

        let mut task = self
            .tasks
            .get(input.id)
            .await?
            .ok_or(Error::TaskNotFound(input.id))?;

        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(state) = input.state {
            task.state = state;
        }
        if let Some(assignee) = input.assigned_person_id {
            task.assigned_person_id = Some(assignee);
        }

        self.tasks.update(task).await?;
        Ok(())
    }

    /// Create a task and return the id the store assigned to it.
    ///
    /// Assigning to another user requires the assign-to-others permission
    /// and aborts creation when it is missing. On success the assignee, if
    /// any, is notified; a failed notification never undoes the insert.
    pub async fn create_task(&self, session: &Session, input: CreateTaskInput) -> Result<TaskId> {
        tracing::info!(title = %input.title, "creating task");

        let mut notify_target = None;
        if let Some(assignee) = input.assigned_person_id {
            let caller = session.user_id()?;
            if assignee != caller {
                self.permissions
                    .authorize(caller, Permission::AssignTaskToOthers)
                    .await?;
                notify_target = Some(assignee);
            }
        }

        let mut task = Task::new(input.title, self.clock.now());
        if let Some(state) = input.state {
            task.state = state;
        }
        task.assigned_person_id = input.assigned_person_id;

        let task_id = self.tasks.insert_and_get_id(task).await?;

        // Side effects only for a committed insert.
        if task_id > 0 {
            if let Some(assignee) = notify_target {
                self.notify_assignee(task_id, assignee).await;
            }
        }

        Ok(task_id)
    }

    /// Tell the assignee about their new task. Failures are logged, never
    /// propagated: the task is already committed.
    async fn notify_assignee(&self, task_id: TaskId, assignee: UserId) {
        let user = match self.users.get(assignee).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(task_id, assignee, "assignee not found, skipping notification");
                return;
            }
            Err(err) => {
                tracing::warn!(task_id, assignee, error = %err, "failed to load assignee");
                return;
            }
        };

        let message = "You have been assigned one task into your todo list.";
        if let Err(err) = self
            .notifications
            .publish(
                NEW_TASK_EVENT,
                &NotificationData::new(message),
                NotificationSeverity::Info,
                &[user.id],
            )
            .await
        {
            tracing::warn!(task_id, error = %err, "failed to publish task notification");
        }

        if let Err(err) = self
            .email
            .send(&user.email_address, "New Todo item", message)
            .await
        {
            tracing::warn!(task_id, error = %err, "failed to send assignment email");
        }
    }

    /// Delete a task. Requires the delete-tasks permission; deleting a
    /// missing task is a silent no-op.
    pub async fn delete_task(&self, session: &Session, task_id: TaskId) -> Result<()> {
        self.permissions
            .authorize(session.user_id()?, Permission::DeleteTasks)
            .await?;

        if !self.tasks.delete(task_id).await? {
            tracing::debug!(task_id, "delete of missing task ignored");
        }
        Ok(())
    }
}
