use super::controller::BriefingController;
use crate::error::{component_error, DeskResult};
use tokio::sync::mpsc;
use tracing::info;

type Reply<T> = mpsc::Sender<DeskResult<T>>;

/// Commands that can be sent to the briefing actor
pub enum BriefingCommand {
    Fetch(bool, Reply<String>),
    Current(Reply<Option<String>>),
    Shutdown,
}

/// The briefing actor; fetches run one at a time
pub struct BriefingActor {
    controller: BriefingController,
    command_rx: mpsc::Receiver<BriefingCommand>,
}

/// Handle for communicating with the briefing actor
#[derive(Clone)]
pub struct BriefingActorHandle {
    command_tx: mpsc::Sender<BriefingCommand>,
}

impl BriefingActorHandle {
    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> BriefingCommand) -> DeskResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Briefing mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Briefing response channel closed"))?
    }

    pub async fn fetch(&self, force: bool) -> DeskResult<String> {
        self.request(|tx| BriefingCommand::Fetch(force, tx)).await
    }

    pub async fn current(&self) -> DeskResult<Option<String>> {
        self.request(BriefingCommand::Current).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        let _ = self.command_tx.send(BriefingCommand::Shutdown).await;
        Ok(())
    }
}

impl BriefingActor {
    /// Create a new actor and return its handle
    pub fn new(controller: BriefingController) -> (Self, BriefingActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            controller,
            command_rx,
        };

        (actor, BriefingActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Briefing actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                BriefingCommand::Fetch(force, response_tx) => {
                    let result = self.controller.fetch(force).await;
                    let _ = response_tx.send(result).await;
                }
                BriefingCommand::Current(response_tx) => {
                    let current = self.controller.text().map(str::to_string);
                    let _ = response_tx.send(Ok(current)).await;
                }
                BriefingCommand::Shutdown => {
                    info!("Briefing actor shutting down");
                    break;
                }
            }
        }

        info!("Briefing actor shut down");
    }
}
