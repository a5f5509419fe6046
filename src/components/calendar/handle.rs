use super::actor::{CalendarActor, CalendarActorHandle};
use super::anchor::Direction;
use super::controller::{upload_refused, CalendarController, CalendarSnapshot, UploadState};
use super::models::UploadFile;
use crate::error::DeskResult;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar actor
#[derive(Clone)]
pub struct CalendarHandle {
    actor_handle: CalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarHandle {
    /// Spawn the actor around a controller
    pub fn new(controller: CalendarController) -> Self {
        let (mut actor, handle) = CalendarActor::new(controller);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Fetch events and reconcile the visible month
    pub async fn load(&self) -> DeskResult<CalendarSnapshot> {
        self.actor_handle.load().await
    }

    pub async fn navigate(&self, direction: Direction) -> DeskResult<CalendarSnapshot> {
        self.actor_handle.navigate(direction).await
    }

    pub async fn jump_to(&self, anchor: NaiveDate) -> DeskResult<CalendarSnapshot> {
        self.actor_handle.jump_to(anchor).await
    }

    /// Upload a spreadsheet. The upload gate is claimed here, before the
    /// command is queued, so a second upload is refused right away instead
    /// of running after the first.
    pub async fn upload(&self, file: UploadFile) -> DeskResult<CalendarSnapshot> {
        let Some(guard) = self.actor_handle.upload_gate().begin() else {
            return Err(upload_refused(self.actor_handle.prompt(), &file.name));
        };
        self.actor_handle.upload(file, guard).await
    }

    /// Delete an event by id; `Ok(false)` means the user declined
    pub async fn delete(&self, id: Option<String>) -> DeskResult<bool> {
        self.actor_handle.delete(id).await
    }

    pub async fn snapshot(&self) -> DeskResult<CalendarSnapshot> {
        self.actor_handle.snapshot().await
    }

    pub fn upload_state(&self) -> UploadState {
        self.actor_handle.upload_gate().state()
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DeskResult<()> {
        self.actor_handle.shutdown().await
    }
}
