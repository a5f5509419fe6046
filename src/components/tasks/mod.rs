mod actor;
pub mod controller;
mod handle;
pub mod models;

pub use controller::TaskController;
pub use handle::TaskHandle;

use super::ComponentContext;
use crate::error::DeskResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Task component: to-do list with AI date and priority extraction
#[derive(Default)]
pub struct Tasks {
    handle: RwLock<Option<TaskHandle>>,
}

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle if the component has been initialized
    pub async fn get_handle(&self) -> Option<TaskHandle> {
        self.handle.read().await.clone()
    }
}

#[async_trait]
impl super::Component for Tasks {
    fn name(&self) -> &'static str {
        "tasks"
    }

    async fn init(&self, ctx: &ComponentContext) -> DeskResult<()> {
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let controller = TaskController::new(ctx.backend.tasks.clone(), ctx.prompt.clone());
            *handle_lock = Some(TaskHandle::new(controller));
        }
        Ok(())
    }

    async fn shutdown(&self) -> DeskResult<()> {
        if let Some(handle) = &*self.handle.read().await {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
