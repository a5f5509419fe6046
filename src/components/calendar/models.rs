use crate::error::DeskResult;
use crate::utils::time::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Category of a calendar event, used for styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Official,
    Trip,
    #[default]
    #[serde(other)]
    Personal,
}

/// A calendar event as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Event {
    /// Missing on legacy records that were never synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Date-only string, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Create an event with just a title and a date
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Set the backend id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The backend id, treating an empty string as missing
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// The event's calendar day, if the stored date parses
    pub fn day(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Body returned by `POST /schedule/upload`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Absent or empty means the caller has to fetch the schedule itself
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}

/// A spreadsheet picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its file name for the upload
    pub async fn from_path(path: &Path) -> DeskResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "schedule.xlsx".to_string());
        Ok(Self { name, bytes })
    }
}

/// Backend records come from spreadsheets and AI output, so `null` shows up
/// where a value is expected
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_event() {
        let json = r#"{
            "id": "abc",
            "title": "교직원 회의",
            "date": "2024-03-05",
            "type": "official",
            "time": "15:00",
            "location": "회의실",
            "manager": "교감"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.id(), Some("abc"));
        assert_eq!(event.kind, EventKind::Official);
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(event.location.as_deref(), Some("회의실"));
        assert_eq!(event.note, None);
    }

    #[test]
    fn test_deserialize_legacy_event() {
        // No id, null title, unknown type
        let json = r#"{"title": null, "date": "2024-03-05", "type": "holiday"}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.id(), None);
        assert_eq!(event.title, "");
        assert_eq!(event.kind, EventKind::Personal);
    }

    #[test]
    fn test_empty_id_counts_as_missing() {
        let event = Event::new("행사", "2024-03-05").with_id("");
        assert_eq!(event.id(), None);
    }

    #[test]
    fn test_upload_response_without_events() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"message": "Successfully processed"}"#).unwrap();
        assert!(response.events.is_none());
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let value = serde_json::to_value(Event::new("출장", "2024-04-02")).unwrap();
        assert_eq!(value["type"], "personal");
        assert!(value.get("id").is_none());
        assert!(value.get("location").is_none());
    }
}
