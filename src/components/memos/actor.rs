use super::controller::MemoController;
use super::models::MemoItem;
use crate::error::{component_error, DeskResult};
use tokio::sync::mpsc;
use tracing::info;

type Reply<T> = mpsc::Sender<DeskResult<T>>;

/// Commands that can be sent to the memo actor
pub enum MemoCommand {
    Load(Reply<Vec<MemoItem>>),
    Add(String, Reply<Vec<MemoItem>>),
    SetChecked(String, bool, Reply<Vec<MemoItem>>),
    Remove(String, Reply<Vec<MemoItem>>),
    Clear(Reply<bool>),
    List(Reply<Vec<MemoItem>>),
    Shutdown,
}

/// The memo actor
pub struct MemoActor {
    controller: MemoController,
    command_rx: mpsc::Receiver<MemoCommand>,
}

/// Handle for communicating with the memo actor
#[derive(Clone)]
pub struct MemoActorHandle {
    command_tx: mpsc::Sender<MemoCommand>,
}

impl MemoActorHandle {
    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> MemoCommand) -> DeskResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Memo mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Memo response channel closed"))?
    }

    pub async fn load(&self) -> DeskResult<Vec<MemoItem>> {
        self.request(MemoCommand::Load).await
    }

    pub async fn add(&self, text: String) -> DeskResult<Vec<MemoItem>> {
        self.request(|tx| MemoCommand::Add(text, tx)).await
    }

    pub async fn set_checked(&self, id: String, checked: bool) -> DeskResult<Vec<MemoItem>> {
        self.request(|tx| MemoCommand::SetChecked(id, checked, tx))
            .await
    }

    pub async fn remove(&self, id: String) -> DeskResult<Vec<MemoItem>> {
        self.request(|tx| MemoCommand::Remove(id, tx)).await
    }

    pub async fn clear(&self) -> DeskResult<bool> {
        self.request(MemoCommand::Clear).await
    }

    pub async fn list(&self) -> DeskResult<Vec<MemoItem>> {
        self.request(MemoCommand::List).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        let _ = self.command_tx.send(MemoCommand::Shutdown).await;
        Ok(())
    }
}

impl MemoActor {
    /// Create a new actor and return its handle
    pub fn new(controller: MemoController) -> (Self, MemoActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            controller,
            command_rx,
        };

        (actor, MemoActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Memo actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                MemoCommand::Load(response_tx) => {
                    let result = self.controller.load().await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                MemoCommand::Add(text, response_tx) => {
                    let result = self.controller.add(&text).await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                MemoCommand::SetChecked(id, checked, response_tx) => {
                    let result = self.controller.set_checked(&id, checked).await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                MemoCommand::Remove(id, response_tx) => {
                    let result = self.controller.remove(&id).await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                MemoCommand::Clear(response_tx) => {
                    let result = self.controller.clear().await;
                    let _ = response_tx.send(result).await;
                }
                MemoCommand::List(response_tx) => {
                    let _ = response_tx.send(Ok(self.controller.items().to_vec())).await;
                }
                MemoCommand::Shutdown => {
                    info!("Memo actor shutting down");
                    break;
                }
            }
        }

        info!("Memo actor shut down");
    }

    fn listing(&self, result: DeskResult<()>) -> DeskResult<Vec<MemoItem>> {
        result.map(|()| self.controller.items().to_vec())
    }
}
