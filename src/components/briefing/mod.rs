mod actor;
pub mod controller;
mod handle;

pub use controller::BriefingController;
pub use handle::BriefingHandle;

use super::ComponentContext;
use crate::error::DeskResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Briefing component: the daily AI summary
#[derive(Default)]
pub struct Briefing {
    handle: RwLock<Option<BriefingHandle>>,
}

impl Briefing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle if the component has been initialized
    pub async fn get_handle(&self) -> Option<BriefingHandle> {
        self.handle.read().await.clone()
    }
}

#[async_trait]
impl super::Component for Briefing {
    fn name(&self) -> &'static str {
        "briefing"
    }

    async fn init(&self, ctx: &ComponentContext) -> DeskResult<()> {
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let controller = BriefingController::new(ctx.backend.briefing.clone());
            *handle_lock = Some(BriefingHandle::new(controller));
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
