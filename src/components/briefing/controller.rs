use crate::components::backend::BriefingRepository;
use crate::error::DeskResult;
use rust_i18n::t;
use std::sync::Arc;
use tracing::{error, info};

/// Holds the last briefing text shown to the user
pub struct BriefingController {
    repository: Arc<dyn BriefingRepository>,
    text: Option<String>,
}

impl BriefingController {
    pub fn new(repository: Arc<dyn BriefingRepository>) -> Self {
        Self {
            repository,
            text: None,
        }
    }

    /// Last text shown, fallback included; `None` before the first fetch
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Fetch today's briefing. `force` asks the backend to regenerate it.
    ///
    /// On failure the stored text becomes the fallback message and the
    /// error is returned.
    pub async fn fetch(&mut self, force: bool) -> DeskResult<String> {
        match self.repository.fetch_briefing(force).await {
            Ok(text) => {
                info!("Fetched briefing ({} chars, forced: {})", text.chars().count(), force);
                self.text = Some(text.clone());
                Ok(text)
            }
            Err(e) => {
                error!("Failed to fetch briefing: {}", e);
                self.text = Some(t!("briefing_fallback").to_string());
                Err(e)
            }
        }
    }
}
