use super::models::MemoItem;
use crate::components::backend::MemoRepository;
use crate::error::{precondition_error, DeskResult};
use crate::utils::prompt::{Notice, Prompt};
use rust_i18n::t;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Owns the memo checklist. Every edit saves the whole list.
pub struct MemoController {
    repository: Arc<dyn MemoRepository>,
    prompt: Arc<dyn Prompt>,
    items: Vec<MemoItem>,
    saved: bool,
}

impl MemoController {
    pub fn new(repository: Arc<dyn MemoRepository>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            repository,
            prompt,
            items: Vec::new(),
            saved: false,
        }
    }

    pub fn items(&self) -> &[MemoItem] {
        &self.items
    }

    /// Whether the last edit reached the backend
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub async fn load(&mut self) -> DeskResult<()> {
        match self.repository.fetch_memos().await {
            Ok(items) => {
                debug!("Loaded {} memo items", items.len());
                self.items = items;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load memos: {}", e);
                self.prompt
                    .notify(Notice::failure(t!("memos_load_failed", error = e.to_string())));
                Err(e)
            }
        }
    }

    /// Append an unchecked item; blank text is ignored
    pub async fn add(&mut self, text: &str) -> DeskResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let mut next = self.items.clone();
        next.push(MemoItem::new(text));
        self.save(next).await
    }

    pub async fn set_checked(&mut self, id: &str, checked: bool) -> DeskResult<()> {
        self.ensure_exists(id)?;

        let mut next = self.items.clone();
        for item in next.iter_mut().filter(|item| item.id == id) {
            item.checked = checked;
        }
        self.save(next).await
    }

    pub async fn remove(&mut self, id: &str) -> DeskResult<()> {
        self.ensure_exists(id)?;

        let next = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.save(next).await
    }

    /// Empty the pad after confirmation; `Ok(false)` when declined
    pub async fn clear(&mut self) -> DeskResult<bool> {
        if !self.prompt.confirm(&t!("memos_clear_confirm")).await {
            return Ok(false);
        }
        self.save(Vec::new()).await?;
        Ok(true)
    }

    fn ensure_exists(&self, id: &str) -> DeskResult<()> {
        if self.items.iter().any(|item| item.id == id) {
            return Ok(());
        }
        let message = t!("memos_not_found", id = id).to_string();
        self.prompt.notify(Notice::failure(message.clone()));
        Err(precondition_error(&message))
    }

    /// Show `next` right away and persist it; the previous list comes back
    /// if the backend refuses
    async fn save(&mut self, next: Vec<MemoItem>) -> DeskResult<()> {
        let previous = std::mem::replace(&mut self.items, next);
        self.saved = false;

        match self.repository.save_memos(&self.items).await {
            Ok(()) => {
                info!("Saved {} memo items", self.items.len());
                self.saved = true;
                self.prompt.notify(Notice::success(t!("memos_saved")));
                Ok(())
            }
            Err(e) => {
                error!("Failed to save memos: {}", e);
                self.items = previous;
                self.prompt
                    .notify(Notice::failure(t!("memos_save_failed", error = e.to_string())));
                Err(e)
            }
        }
    }
}
