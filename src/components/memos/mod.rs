mod actor;
pub mod controller;
mod handle;
pub mod models;

pub use controller::MemoController;
pub use handle::MemoHandle;

use super::ComponentContext;
use crate::error::DeskResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Memo component: a checklist saved as one list per user
#[derive(Default)]
pub struct Memos {
    handle: RwLock<Option<MemoHandle>>,
}

impl Memos {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle if the component has been initialized
    pub async fn get_handle(&self) -> Option<MemoHandle> {
        self.handle.read().await.clone()
    }
}

#[async_trait]
impl super::Component for Memos {
    fn name(&self) -> &'static str {
        "memos"
    }

    async fn init(&self, ctx: &ComponentContext) -> DeskResult<()> {
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            let controller = MemoController::new(ctx.backend.memos.clone(), ctx.prompt.clone());
            *handle_lock = Some(MemoHandle::new(controller));
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
