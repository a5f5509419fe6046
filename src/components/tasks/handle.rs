use super::actor::{TaskActor, TaskActorHandle};
use super::controller::TaskController;
use super::models::Task;
use crate::error::DeskResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the task actor
#[derive(Clone)]
pub struct TaskHandle {
    actor_handle: TaskActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl TaskHandle {
    /// Spawn the actor around a controller
    pub fn new(controller: TaskController) -> Self {
        let (mut actor, handle) = TaskActor::new(controller);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Fetch the task list from the backend
    pub async fn load(&self) -> DeskResult<Vec<Task>> {
        self.actor_handle.load().await
    }

    /// Add a task from free text; `Ok(None)` for blank input
    pub async fn add(&self, text: impl Into<String>) -> DeskResult<Option<Task>> {
        self.actor_handle.add(text.into()).await
    }

    pub async fn toggle(&self, id: impl Into<String>) -> DeskResult<Vec<Task>> {
        self.actor_handle.toggle(id.into()).await
    }

    pub async fn cycle_priority(&self, id: impl Into<String>) -> DeskResult<Vec<Task>> {
        self.actor_handle.cycle_priority(id.into()).await
    }

    /// Delete a task; `Ok(false)` means the user declined
    pub async fn delete(&self, id: impl Into<String>) -> DeskResult<bool> {
        self.actor_handle.delete(id.into()).await
    }

    /// Cached task list, without a backend round trip
    pub async fn list(&self) -> DeskResult<Vec<Task>> {
        self.actor_handle.list().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        self.actor_handle.shutdown().await
    }
}
