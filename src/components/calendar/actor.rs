use super::anchor::Direction;
use super::controller::{CalendarController, CalendarSnapshot, UploadGate, UploadGuard};
use super::models::UploadFile;
use crate::error::{component_error, DeskResult};
use crate::utils::prompt::Prompt;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

type Reply<T> = mpsc::Sender<DeskResult<T>>;

/// Commands that can be sent to the calendar actor
pub enum CalendarCommand {
    Load(Reply<CalendarSnapshot>),
    Navigate(Direction, Reply<CalendarSnapshot>),
    JumpTo(NaiveDate, Reply<CalendarSnapshot>),
    /// The guard holds the upload gate until the actor is done with the file
    Upload(UploadFile, UploadGuard, Reply<CalendarSnapshot>),
    Delete(Option<String>, Reply<bool>),
    Snapshot(Reply<CalendarSnapshot>),
    Shutdown,
}

/// The calendar actor that owns the view state
pub struct CalendarActor {
    controller: CalendarController,
    command_rx: mpsc::Receiver<CalendarCommand>,
}

/// Handle for communicating with the calendar actor
#[derive(Clone)]
pub struct CalendarActorHandle {
    command_tx: mpsc::Sender<CalendarCommand>,
    gate: UploadGate,
    prompt: Arc<dyn Prompt>,
}

impl CalendarActorHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> CalendarCommand,
    ) -> DeskResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Calendar mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Calendar response channel closed"))?
    }

    pub async fn load(&self) -> DeskResult<CalendarSnapshot> {
        self.request(CalendarCommand::Load).await
    }

    pub async fn navigate(&self, direction: Direction) -> DeskResult<CalendarSnapshot> {
        self.request(|tx| CalendarCommand::Navigate(direction, tx)).await
    }

    pub async fn jump_to(&self, anchor: NaiveDate) -> DeskResult<CalendarSnapshot> {
        self.request(|tx| CalendarCommand::JumpTo(anchor, tx)).await
    }

    pub async fn upload(
        &self,
        file: UploadFile,
        guard: UploadGuard,
    ) -> DeskResult<CalendarSnapshot> {
        self.request(|tx| CalendarCommand::Upload(file, guard, tx)).await
    }

    pub async fn delete(&self, id: Option<String>) -> DeskResult<bool> {
        self.request(|tx| CalendarCommand::Delete(id, tx)).await
    }

    pub async fn snapshot(&self) -> DeskResult<CalendarSnapshot> {
        self.request(CalendarCommand::Snapshot).await
    }

    /// Upload flag, readable without a round trip to the actor
    pub fn upload_gate(&self) -> &UploadGate {
        &self.gate
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.prompt.as_ref()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        let _ = self.command_tx.send(CalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl CalendarActor {
    /// Create a new actor and return its handle
    pub fn new(controller: CalendarController) -> (Self, CalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let gate = controller.upload_gate();
        let prompt = controller.prompt();

        let actor = Self {
            controller,
            command_rx,
        };

        (
            actor,
            CalendarActorHandle {
                command_tx,
                gate,
                prompt,
            },
        )
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CalendarCommand::Load(response_tx) => {
                    let result = self.controller.load().await;
                    let _ = response_tx.send(self.reply(result)).await;
                }
                CalendarCommand::Navigate(direction, response_tx) => {
                    self.controller.navigate(direction);
                    let _ = response_tx.send(Ok(self.controller.snapshot())).await;
                }
                CalendarCommand::JumpTo(anchor, response_tx) => {
                    self.controller.set_anchor(anchor);
                    let _ = response_tx.send(Ok(self.controller.snapshot())).await;
                }
                CalendarCommand::Upload(file, guard, response_tx) => {
                    self.controller.select_file(file);
                    let result = self.controller.upload_holding(guard).await;
                    let _ = response_tx.send(self.reply(result)).await;
                }
                CalendarCommand::Delete(id, response_tx) => {
                    let result = self.controller.delete(id.as_deref()).await;
                    let _ = response_tx.send(result).await;
                }
                CalendarCommand::Snapshot(response_tx) => {
                    let _ = response_tx.send(Ok(self.controller.snapshot())).await;
                }
                CalendarCommand::Shutdown => {
                    info!("Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Calendar actor shut down");
    }

    fn reply(&self, result: DeskResult<()>) -> DeskResult<CalendarSnapshot> {
        result.map(|()| self.controller.snapshot())
    }
}
