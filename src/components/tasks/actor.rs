use super::controller::TaskController;
use super::models::Task;
use crate::error::{component_error, DeskResult};
use tokio::sync::mpsc;
use tracing::info;

type Reply<T> = mpsc::Sender<DeskResult<T>>;

/// Commands that can be sent to the task actor
pub enum TaskCommand {
    Load(Reply<Vec<Task>>),
    Add(String, Reply<Option<Task>>),
    Toggle(String, Reply<Vec<Task>>),
    CyclePriority(String, Reply<Vec<Task>>),
    Delete(String, Reply<bool>),
    List(Reply<Vec<Task>>),
    Shutdown,
}

/// The task actor; adds and edits are applied one at a time
pub struct TaskActor {
    controller: TaskController,
    command_rx: mpsc::Receiver<TaskCommand>,
}

/// Handle for communicating with the task actor
#[derive(Clone)]
pub struct TaskActorHandle {
    command_tx: mpsc::Sender<TaskCommand>,
}

impl TaskActorHandle {
    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> TaskCommand) -> DeskResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| component_error(&format!("Task mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| component_error("Task response channel closed"))?
    }

    pub async fn load(&self) -> DeskResult<Vec<Task>> {
        self.request(TaskCommand::Load).await
    }

    pub async fn add(&self, text: String) -> DeskResult<Option<Task>> {
        self.request(|tx| TaskCommand::Add(text, tx)).await
    }

    pub async fn toggle(&self, id: String) -> DeskResult<Vec<Task>> {
        self.request(|tx| TaskCommand::Toggle(id, tx)).await
    }

    pub async fn cycle_priority(&self, id: String) -> DeskResult<Vec<Task>> {
        self.request(|tx| TaskCommand::CyclePriority(id, tx)).await
    }

    pub async fn delete(&self, id: String) -> DeskResult<bool> {
        self.request(|tx| TaskCommand::Delete(id, tx)).await
    }

    pub async fn list(&self) -> DeskResult<Vec<Task>> {
        self.request(TaskCommand::List).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        let _ = self.command_tx.send(TaskCommand::Shutdown).await;
        Ok(())
    }
}

impl TaskActor {
    /// Create a new actor and return its handle
    pub fn new(controller: TaskController) -> (Self, TaskActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            controller,
            command_rx,
        };

        (actor, TaskActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Task actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                TaskCommand::Load(response_tx) => {
                    let result = self.controller.load().await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                TaskCommand::Add(text, response_tx) => {
                    let result = self.controller.add(&text).await;
                    let _ = response_tx.send(result).await;
                }
                TaskCommand::Toggle(id, response_tx) => {
                    let result = self.controller.toggle(&id).await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                TaskCommand::CyclePriority(id, response_tx) => {
                    let result = self.controller.cycle_priority(&id).await;
                    let _ = response_tx.send(self.listing(result)).await;
                }
                TaskCommand::Delete(id, response_tx) => {
                    let result = self.controller.delete(&id).await;
                    let _ = response_tx.send(result).await;
                }
                TaskCommand::List(response_tx) => {
                    let _ = response_tx.send(Ok(self.controller.tasks().to_vec())).await;
                }
                TaskCommand::Shutdown => {
                    info!("Task actor shutting down");
                    break;
                }
            }
        }

        info!("Task actor shut down");
    }

    fn listing(&self, result: DeskResult<()>) -> DeskResult<Vec<Task>> {
        result.map(|()| self.controller.tasks().to_vec())
    }
}
