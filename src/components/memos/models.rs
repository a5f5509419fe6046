use serde::{Deserialize, Serialize};

/// One line of the checklist memo pad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl MemoItem {
    /// New unchecked item with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            checked: false,
        }
    }
}
