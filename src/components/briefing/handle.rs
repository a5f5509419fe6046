use super::actor::{BriefingActor, BriefingActorHandle};
use super::controller::BriefingController;
use crate::error::DeskResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the briefing actor
#[derive(Clone)]
pub struct BriefingHandle {
    actor_handle: BriefingActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl BriefingHandle {
    /// Spawn the actor around a controller
    pub fn new(controller: BriefingController) -> Self {
        let (mut actor, handle) = BriefingActor::new(controller);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Fetch the briefing, regenerating it when `force` is set
    pub async fn fetch(&self, force: bool) -> DeskResult<String> {
        self.actor_handle.fetch(force).await
    }

    /// Text currently on screen, which is the fallback after a failed fetch
    pub async fn current(&self) -> DeskResult<Option<String>> {
        self.actor_handle.current().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        self.actor_handle.shutdown().await
    }
}
