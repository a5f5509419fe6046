//! Hand-written stand-ins for the backend and the terminal.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use kyomu::components::backend::{
    BriefingRepository, EventRepository, MemoRepository, TaskRepository,
};
use kyomu::components::calendar::models::{Event, UploadFile, UploadResponse};
use kyomu::components::memos::models::MemoItem;
use kyomu::components::tasks::models::{Priority, Task, TaskAnalysis, TaskPatch};
use kyomu::error::{transport_error, DeskResult};
use kyomu::utils::prompt::{Notice, NoticeLevel, Prompt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Backend event store with call counters and switchable failures
#[derive(Default)]
pub struct MockEvents {
    pub events: Mutex<Vec<Event>>,
    pub upload_response: Mutex<UploadResponse>,
    pub fetch_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_upload: AtomicBool,
    pub fail_delete: AtomicBool,
    /// When set, uploads wait for `release_upload` after signalling `upload_started`
    pub hold_upload: AtomicBool,
    pub upload_started: Notify,
    pub release_upload: Notify,
}

impl MockEvents {
    pub fn with_events(events: Vec<Event>) -> Self {
        let mock = Self::default();
        *mock.events.lock().unwrap() = events;
        mock
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventRepository for MockEvents {
    async fn fetch_events(&self) -> DeskResult<Vec<Event>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 500 Internal Server Error"));
        }
        Ok(self.events.lock().unwrap().clone())
    }

    async fn upload_schedule(&self, _file: UploadFile) -> DeskResult<UploadResponse> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_upload.load(Ordering::SeqCst) {
            self.upload_started.notify_one();
            self.release_upload.notified().await;
        }
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 400 Bad Request - Invalid file type"));
        }
        Ok(self.upload_response.lock().unwrap().clone())
    }

    async fn delete_event(&self, _id: &str) -> DeskResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 404 Not Found"));
        }
        Ok(())
    }
}

/// Backend task store; edits are recorded, never applied
#[derive(Default)]
pub struct MockTasks {
    pub tasks: Mutex<Vec<Task>>,
    pub patches: Mutex<Vec<(String, TaskPatch)>>,
    pub fetch_calls: AtomicUsize,
    pub created: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_analyze: AtomicBool,
}

impl MockTasks {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mock = Self::default();
        *mock.tasks.lock().unwrap() = tasks;
        mock
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskRepository for MockTasks {
    async fn fetch_tasks(&self) -> DeskResult<Vec<Task>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 503 Service Unavailable"));
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn analyze_task(&self, text: &str) -> DeskResult<TaskAnalysis> {
        if self.fail_analyze.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 500 Internal Server Error - AI analysis failed"));
        }
        Ok(TaskAnalysis {
            task: text.to_string(),
            due_date: Some("2024-03-05".to_string()),
            priority: Some(Priority::High),
        })
    }

    async fn create_task(&self, analysis: &TaskAnalysis) -> DeskResult<Task> {
        let n = self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Task {
            id: format!("new-{}", n),
            content: analysis.task.clone(),
            due_date: analysis.due_date.clone(),
            priority: analysis.priority.unwrap_or_default(),
            is_completed: false,
            created_at: None,
        })
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> DeskResult<()> {
        self.patches
            .lock()
            .unwrap()
            .push((id.to_string(), patch.clone()));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 500 Internal Server Error"));
        }
        Ok(())
    }
}

/// Backend memo store that keeps the last saved list
#[derive(Default)]
pub struct MockMemos {
    pub saved: Mutex<Vec<MemoItem>>,
    pub save_calls: AtomicUsize,
    pub fail_save: AtomicBool,
}

#[async_trait]
impl MemoRepository for MockMemos {
    async fn fetch_memos(&self) -> DeskResult<Vec<MemoItem>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    async fn save_memos(&self, items: &[MemoItem]) -> DeskResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 500 Internal Server Error"));
        }
        *self.saved.lock().unwrap() = items.to_vec();
        Ok(())
    }
}

/// Briefing source that records whether a refresh was forced
#[derive(Default)]
pub struct MockBriefing {
    pub text: Mutex<String>,
    pub forced: Mutex<Vec<bool>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl BriefingRepository for MockBriefing {
    async fn fetch_briefing(&self, force_refresh: bool) -> DeskResult<String> {
        self.forced.lock().unwrap().push(force_refresh);
        if self.fail.load(Ordering::SeqCst) {
            return Err(transport_error("HTTP 502 Bad Gateway"));
        }
        Ok(self.text.lock().unwrap().clone())
    }
}

/// Prompt with scripted answers that records every notice and question
#[derive(Default)]
pub struct RecordingPrompt {
    answers: Mutex<VecDeque<bool>>,
    pub questions: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingPrompt {
    /// Answer the next questions in order; unscripted questions get "no"
    pub fn answering(answers: &[bool]) -> Self {
        let prompt = Self::default();
        prompt.answers.lock().unwrap().extend(answers.iter().copied());
        prompt
    }

    pub fn question_count(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|notice| notice.level)
            .collect()
    }
}

#[async_trait]
impl Prompt for RecordingPrompt {
    async fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn task(id: &str, content: &str, priority: Priority, done: bool) -> Task {
    Task {
        id: id.to_string(),
        content: content.to_string(),
        due_date: None,
        priority,
        is_completed: done,
        created_at: None,
    }
}
