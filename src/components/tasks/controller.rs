use super::models::{Task, TaskPatch};
use crate::components::backend::TaskRepository;
use crate::error::{precondition_error, DeskResult};
use crate::utils::optimistic::apply_optimistic;
use crate::utils::prompt::{Notice, Prompt};
use rust_i18n::t;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Owns the cached task list and its optimistic edits
pub struct TaskController {
    repository: Arc<dyn TaskRepository>,
    prompt: Arc<dyn Prompt>,
    tasks: Vec<Task>,
}

impl TaskController {
    pub fn new(repository: Arc<dyn TaskRepository>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            repository,
            prompt,
            tasks: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the cache with the backend's list; keeps the old one on failure
    pub async fn load(&mut self) -> DeskResult<()> {
        match self.repository.fetch_tasks().await {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load tasks: {}", e);
                self.prompt
                    .notify(Notice::failure(t!("tasks_load_failed", error = e.to_string())));
                Err(e)
            }
        }
    }

    /// Run free text through the analysis service and store the result.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    pub async fn add(&mut self, text: &str) -> DeskResult<Option<Task>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let created = async {
            let analysis = self.repository.analyze_task(text).await?;
            self.repository.create_task(&analysis).await
        }
        .await;

        match created {
            Ok(task) => {
                info!("Added task {} ({})", task.id, task.priority.as_str());
                self.tasks.insert(0, task.clone());
                Ok(Some(task))
            }
            Err(e) => {
                error!("Failed to add task: {}", e);
                self.prompt
                    .notify(Notice::failure(t!("tasks_add_failed", error = e.to_string())));
                Err(e)
            }
        }
    }

    /// Flip completion locally, then persist; the flag is restored on failure
    pub async fn toggle(&mut self, id: &str) -> DeskResult<()> {
        let next = !self.find(id)?.is_completed;
        let repository = Arc::clone(&self.repository);
        let patch = TaskPatch::completed(next);

        let result = apply_optimistic(
            &mut self.tasks,
            |task| task.id == id,
            |task| &mut task.is_completed,
            next,
            repository.update_task(id, &patch),
        )
        .await;

        self.report(result, "toggle")
    }

    /// Move to the next priority, then persist; only this task's priority is
    /// restored on failure
    pub async fn cycle_priority(&mut self, id: &str) -> DeskResult<()> {
        let next = self.find(id)?.priority.next();
        let repository = Arc::clone(&self.repository);
        let patch = TaskPatch::priority(next);

        let result = apply_optimistic(
            &mut self.tasks,
            |task| task.id == id,
            |task| &mut task.priority,
            next,
            repository.update_task(id, &patch),
        )
        .await;

        self.report(result, "priority")
    }

    /// Soft-delete after confirmation. The task disappears immediately; if
    /// the backend refuses, the whole list is fetched again.
    ///
    /// Returns `Ok(false)` when the user declined.
    pub async fn delete(&mut self, id: &str) -> DeskResult<bool> {
        self.find(id)?;

        if !self.prompt.confirm(&t!("tasks_delete_confirm")).await {
            return Ok(false);
        }

        self.tasks.retain(|task| task.id != id);

        if let Err(e) = self.repository.update_task(id, &TaskPatch::deleted()).await {
            error!("Failed to delete task {}: {}", id, e);
            self.prompt
                .notify(Notice::failure(t!("tasks_delete_failed", error = e.to_string())));
            if let Err(reload) = self.load().await {
                warn!("Resync after failed delete also failed: {}", reload);
            }
            return Err(e);
        }

        info!("Deleted task {}", id);
        Ok(true)
    }

    fn find(&self, id: &str) -> DeskResult<&Task> {
        match self.tasks.iter().find(|task| task.id == id) {
            Some(task) => Ok(task),
            None => {
                let message = t!("tasks_not_found", id = id).to_string();
                self.prompt.notify(Notice::failure(message.clone()));
                Err(precondition_error(&message))
            }
        }
    }

    fn report(&self, result: DeskResult<()>, action: &str) -> DeskResult<()> {
        if let Err(e) = &result {
            error!("Task {} update failed: {}", action, e);
            self.prompt
                .notify(Notice::failure(t!("tasks_update_failed", error = e.to_string())));
        }
        result
    }
}
