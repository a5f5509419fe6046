use super::actor::{MemoActor, MemoActorHandle};
use super::controller::MemoController;
use super::models::MemoItem;
use crate::error::DeskResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the memo actor
#[derive(Clone)]
pub struct MemoHandle {
    actor_handle: MemoActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl MemoHandle {
    /// Spawn the actor around a controller
    pub fn new(controller: MemoController) -> Self {
        let (mut actor, handle) = MemoActor::new(controller);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    pub async fn load(&self) -> DeskResult<Vec<MemoItem>> {
        self.actor_handle.load().await
    }

    pub async fn add(&self, text: impl Into<String>) -> DeskResult<Vec<MemoItem>> {
        self.actor_handle.add(text.into()).await
    }

    pub async fn set_checked(
        &self,
        id: impl Into<String>,
        checked: bool,
    ) -> DeskResult<Vec<MemoItem>> {
        self.actor_handle.set_checked(id.into(), checked).await
    }

    pub async fn remove(&self, id: impl Into<String>) -> DeskResult<Vec<MemoItem>> {
        self.actor_handle.remove(id.into()).await
    }

    /// Empty the memo pad; `Ok(false)` means the user declined
    pub async fn clear(&self) -> DeskResult<bool> {
        self.actor_handle.clear().await
    }

    pub async fn list(&self) -> DeskResult<Vec<MemoItem>> {
        self.actor_handle.list().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        self.actor_handle.shutdown().await
    }
}
