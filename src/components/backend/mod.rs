//! The dashboard backend as seen by the client.
//!
//! Each controller depends on one repository trait so tests can stand in
//! for the HTTP backend. `ApiClient` implements all of them.

mod client;

pub use client::ApiClient;

use crate::components::calendar::models::{Event, UploadFile, UploadResponse};
use crate::components::memos::models::MemoItem;
use crate::components::tasks::models::{Task, TaskAnalysis, TaskPatch};
use crate::error::DeskResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Calendar events: `/schedule`
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn fetch_events(&self) -> DeskResult<Vec<Event>>;

    async fn upload_schedule(&self, file: UploadFile) -> DeskResult<UploadResponse>;

    async fn delete_event(&self, id: &str) -> DeskResult<()>;
}

/// To-do items: `/tasks`
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn fetch_tasks(&self) -> DeskResult<Vec<Task>>;

    async fn analyze_task(&self, text: &str) -> DeskResult<TaskAnalysis>;

    async fn create_task(&self, analysis: &TaskAnalysis) -> DeskResult<Task>;

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> DeskResult<()>;
}

/// Checklist memo pad, stored as one list per user: `/memos`
#[async_trait]
pub trait MemoRepository: Send + Sync {
    async fn fetch_memos(&self) -> DeskResult<Vec<MemoItem>>;

    async fn save_memos(&self, items: &[MemoItem]) -> DeskResult<()>;
}

/// Daily AI briefing: `/briefing`
#[async_trait]
pub trait BriefingRepository: Send + Sync {
    async fn fetch_briefing(&self, force_refresh: bool) -> DeskResult<String>;
}

/// One repository per concern, shared by every component
#[derive(Clone)]
pub struct Backend {
    pub events: Arc<dyn EventRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub memos: Arc<dyn MemoRepository>,
    pub briefing: Arc<dyn BriefingRepository>,
}

impl Backend {
    /// Route every concern through one HTTP client
    pub fn http(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            events: client.clone(),
            tasks: client.clone(),
            memos: client.clone(),
            briefing: client,
        }
    }
}
