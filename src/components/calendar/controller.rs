//! Calendar view state: the month on screen, the cached events and the
//! upload lifecycle.

use super::anchor::{navigate, reconcile_anchor, Direction};
use super::geometry::CalendarGrid;
use super::models::{Event, UploadFile};
use crate::components::backend::EventRepository;
use crate::error::{precondition_error, DeskResult, Error};
use crate::utils::prompt::{Notice, Prompt};
use crate::utils::time::Clock;
use chrono::NaiveDate;
use rust_i18n::t;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Whether an upload is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Uploading,
}

/// Upload flag shared between the controller and every handle.
///
/// Whoever starts an upload claims it first: handles claim it before
/// queueing the command, so a second upload is refused instead of waiting
/// behind the first in the mailbox.
#[derive(Debug, Clone, Default)]
pub struct UploadGate {
    uploading: Arc<AtomicBool>,
}

impl UploadGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> UploadState {
        if self.is_uploading() {
            UploadState::Uploading
        } else {
            UploadState::Idle
        }
    }

    /// Move to `Uploading`, or `None` if an upload already holds the gate
    pub(crate) fn begin(&self) -> Option<UploadGuard> {
        self.uploading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| UploadGuard {
                uploading: Arc::clone(&self.uploading),
            })
    }
}

/// Returns the gate to `Idle` when the upload finishes, whatever the outcome
pub struct UploadGuard {
    uploading: Arc<AtomicBool>,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        self.uploading.store(false, Ordering::SeqCst);
    }
}

/// Tell the user an upload was refused because another one holds the gate
pub(crate) fn upload_refused(prompt: &dyn Prompt, file: &str) -> Error {
    warn!("Upload of {} refused, another upload is in flight", file);
    let message = t!("calendar_upload_in_progress").to_string();
    prompt.notify(Notice::failure(message.clone()));
    precondition_error(&message)
}

/// Everything a view needs to draw the calendar
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub anchor: NaiveDate,
    pub events: Vec<Event>,
    pub grid: CalendarGrid,
    pub upload_state: UploadState,
}

/// Owns the calendar view state
pub struct CalendarController {
    repository: Arc<dyn EventRepository>,
    prompt: Arc<dyn Prompt>,
    clock: Arc<dyn Clock>,
    anchor: NaiveDate,
    events: Vec<Event>,
    gate: UploadGate,
    selected_file: Option<UploadFile>,
}

impl CalendarController {
    /// Start on today's month with an empty event list
    pub fn new(
        repository: Arc<dyn EventRepository>,
        prompt: Arc<dyn Prompt>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let anchor = clock.today();
        Self {
            repository,
            prompt,
            clock,
            anchor,
            events: Vec::new(),
            gate: UploadGate::new(),
            selected_file: None,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn upload_state(&self) -> UploadState {
        self.gate.state()
    }

    /// Shared view of the upload flag for handles
    pub fn upload_gate(&self) -> UploadGate {
        self.gate.clone()
    }

    /// Notice sink, shared with handles that refuse work before it reaches
    /// the actor
    pub(crate) fn prompt(&self) -> Arc<dyn Prompt> {
        Arc::clone(&self.prompt)
    }

    pub fn selected_file(&self) -> Option<&UploadFile> {
        self.selected_file.as_ref()
    }

    /// Month grid for the current anchor
    pub fn grid(&self) -> CalendarGrid {
        CalendarGrid::new(self.anchor, self.clock.today())
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            anchor: self.anchor,
            events: self.events.clone(),
            grid: self.grid(),
            upload_state: self.upload_state(),
        }
    }

    /// Jump straight to a date, e.g. a `--month` argument
    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    /// Fetch all events, replace the cache and move the anchor to the
    /// nearest event when the current month has none.
    ///
    /// On failure the previous events and anchor are kept.
    pub async fn load(&mut self) -> DeskResult<()> {
        match self.repository.fetch_events().await {
            Ok(events) => {
                info!("Loaded {} events", events.len());
                self.events = events;
                self.reconcile();
                Ok(())
            }
            Err(e) => {
                error!("Failed to load events: {}", e);
                self.prompt
                    .notify(Notice::failure(t!("calendar_load_failed", error = e.to_string())));
                Err(e)
            }
        }
    }

    fn reconcile(&mut self) {
        let today = self.clock.today();
        if let Some(target) = reconcile_anchor(&self.events, self.anchor, today) {
            info!("No events in {}, jumping to {}", self.anchor.format("%Y-%m"), target);
            self.anchor = target;
        }
    }

    /// Show the previous or next month
    pub fn navigate(&mut self, direction: Direction) -> NaiveDate {
        self.anchor = navigate(self.anchor, direction);
        self.anchor
    }

    /// Pick the file the next `upload` sends
    pub fn select_file(&mut self, file: UploadFile) {
        self.selected_file = Some(file);
    }

    /// Send the selected spreadsheet to the backend.
    ///
    /// No selection is a silent no-op. The selection is consumed in every
    /// outcome so the same file is never sent twice by accident.
    pub async fn upload(&mut self) -> DeskResult<()> {
        let Some(name) = self.selected_file.as_ref().map(|file| file.name.clone()) else {
            return Ok(());
        };

        match self.gate.begin() {
            Some(guard) => self.upload_holding(guard).await,
            None => {
                self.selected_file = None;
                Err(upload_refused(self.prompt.as_ref(), &name))
            }
        }
    }

    /// Same as `upload`, for a caller that already claimed the gate. The
    /// gate is released when `guard` drops at the end of the upload.
    pub async fn upload_holding(&mut self, guard: UploadGuard) -> DeskResult<()> {
        let _guard = guard;
        let Some(file) = self.selected_file.take() else {
            return Ok(());
        };

        info!("Uploading schedule {}", file.name);
        let response = match self.repository.upload_schedule(file).await {
            Ok(response) => response,
            Err(e) => {
                error!("Schedule upload failed: {}", e);
                self.prompt
                    .notify(Notice::failure(t!("calendar_upload_failed", error = e.to_string())));
                return Err(e);
            }
        };

        self.prompt.notify(Notice::success(t!("calendar_upload_success")));

        match response.events {
            Some(events) if !events.is_empty() => {
                if let Some(day) = events[0].day() {
                    self.anchor = day;
                }
                self.events = events;
                Ok(())
            }
            // The upload itself succeeded, a failed refresh only costs the cache
            _ => {
                let _ = self.load().await;
                Ok(())
            }
        }
    }

    /// Delete one event after confirmation.
    ///
    /// Returns `Ok(false)` when the user declined. Events without an id
    /// are refused before anyone is asked.
    pub async fn delete(&mut self, id: Option<&str>) -> DeskResult<bool> {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            let message = t!("calendar_delete_missing_id").to_string();
            self.prompt.notify(Notice::failure(message.clone()));
            return Err(precondition_error(&message));
        };

        if !self.prompt.confirm(&t!("calendar_delete_confirm")).await {
            return Ok(false);
        }

        if let Err(e) = self.repository.delete_event(id).await {
            error!("Failed to delete event {}: {}", id, e);
            self.prompt
                .notify(Notice::failure(t!("calendar_delete_failed", error = e.to_string())));
            return Err(e);
        }

        self.events.retain(|event| event.id() != Some(id));
        info!("Deleted event {}", id);
        self.prompt.notify(Notice::success(t!("calendar_delete_success")));
        Ok(true)
    }
}
