mod actor;
pub mod anchor;
pub mod controller;
pub mod geometry;
mod handle;
pub mod models;

pub use anchor::Direction;
pub use controller::{CalendarController, CalendarSnapshot, UploadState};
pub use handle::CalendarHandle;

use super::ComponentContext;
use crate::error::DeskResult;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Calendar component: month view over the uploaded school schedule
#[derive(Default)]
pub struct Calendar {
    handle: RwLock<Option<CalendarHandle>>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle if the component has been initialized
    pub async fn get_handle(&self) -> Option<CalendarHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Calendar {
    fn name(&self) -> &'static str {
        "calendar"
    }

    async fn init(&self, ctx: &ComponentContext) -> DeskResult<()> {
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let controller = CalendarController::new(
                ctx.backend.events.clone(),
                ctx.prompt.clone(),
                ctx.clock.clone(),
            );
            *handle_lock = Some(CalendarHandle::new(controller));
        } else {
            debug!("Calendar already initialized");
        }
        Ok(())
    }

    async fn shutdown(&self) -> DeskResult<()> {
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
