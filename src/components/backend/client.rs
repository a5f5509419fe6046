use super::{BriefingRepository, EventRepository, MemoRepository, TaskRepository};
use crate::components::calendar::models::{Event, UploadFile, UploadResponse};
use crate::components::memos::models::MemoItem;
use crate::components::tasks::models::{Task, TaskAnalysis, TaskPatch};
use crate::config::Config;
use crate::error::{config_error, transport_error, DeskResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

/// HTTP client for the dashboard backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    user_id: String,
    client: Client,
}

#[derive(Deserialize)]
struct BriefingResponse {
    briefing: String,
}

impl ApiClient {
    /// Create a client for the backend at `api_url`
    pub fn new(api_url: &str, user_id: impl Into<String>) -> DeskResult<Self> {
        let base_url = Url::parse(api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(config_error(&format!("API_URL cannot be a base: {}", api_url)));
        }

        Ok(Self {
            base_url,
            user_id: user_id.into(),
            client: Client::new(),
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> DeskResult<Self> {
        Self::new(&config.api_url, config.user_id.clone())
    }

    /// Build an endpoint URL below the base path, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> DeskResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| config_error("API_URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Same as `endpoint`, scoped to the configured user
    fn user_endpoint(&self, segments: &[&str]) -> DeskResult<Url> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().append_pair("uid", &self.user_id);
        Ok(url)
    }

    /// Probe `GET /health`
    pub async fn health(&self) -> DeskResult<Value> {
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// Turn a non-success response into a transport error carrying the server's message
async fn check_status(response: Response) -> DeskResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response".to_string());
    Err(transport_error(&error_detail(status, &body)))
}

/// Message for a failed response: FastAPI's `detail` field when present,
/// otherwise the raw body
fn error_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(str::to_string));

    match detail {
        Some(detail) => format!("HTTP {} - {}", status, detail),
        None if body.trim().is_empty() => format!("HTTP {}", status),
        None => format!("HTTP {} - {}", status, body.trim()),
    }
}

#[async_trait]
impl EventRepository for ApiClient {
    async fn fetch_events(&self) -> DeskResult<Vec<Event>> {
        let url = self.endpoint(&["schedule"])?;
        debug!("Fetching events from {}", url);

        let response = self.client.get(url).send().await?;
        let events: Vec<Event> = check_status(response).await?.json().await?;

        debug!("Fetched {} events", events.len());
        Ok(events)
    }

    async fn upload_schedule(&self, file: UploadFile) -> DeskResult<UploadResponse> {
        let url = self.endpoint(&["schedule", "upload"])?;
        info!("Uploading {} ({} bytes)", file.name, file.bytes.len());

        let part = Part::bytes(file.bytes).file_name(file.name);
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let body: UploadResponse = check_status(response).await?.json().await?;

        if let Some(message) = &body.message {
            info!("Upload finished: {}", message);
        }
        Ok(body)
    }

    async fn delete_event(&self, id: &str) -> DeskResult<()> {
        let url = self.endpoint(&["schedule", id])?;
        debug!("Deleting event {}", id);

        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for ApiClient {
    async fn fetch_tasks(&self) -> DeskResult<Vec<Task>> {
        let url = self.user_endpoint(&["tasks"])?;
        let response = self.client.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn analyze_task(&self, text: &str) -> DeskResult<TaskAnalysis> {
        let url = self.endpoint(&["tasks", "analyze"])?;
        debug!("Analyzing task text ({} chars)", text.chars().count());

        let response = self
            .client
            .post(url)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create_task(&self, analysis: &TaskAnalysis) -> DeskResult<Task> {
        let url = self.endpoint(&["tasks"])?;
        let body = json!({
            "uid": self.user_id,
            "task": analysis.task,
            "due_date": analysis.due_date,
            "priority": analysis.priority.unwrap_or_default(),
        });

        let response = self.client.post(url).json(&body).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> DeskResult<()> {
        let url = self.endpoint(&["tasks", id])?;
        let response = self.client.patch(url).json(patch).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl MemoRepository for ApiClient {
    async fn fetch_memos(&self) -> DeskResult<Vec<MemoItem>> {
        let url = self.user_endpoint(&["memos", ""])?;
        let response = self.client.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn save_memos(&self, items: &[MemoItem]) -> DeskResult<()> {
        let url = self.user_endpoint(&["memos", ""])?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "items": items }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl BriefingRepository for ApiClient {
    async fn fetch_briefing(&self, force_refresh: bool) -> DeskResult<String> {
        let mut url = self.endpoint(&["briefing"])?;
        if force_refresh {
            url.query_pairs_mut().append_pair("force_refresh", "true");
        }

        let response = self.client.get(url).send().await?;
        let body: BriefingResponse = check_status(response).await?.json().await?;
        Ok(body.briefing)
    }
}
