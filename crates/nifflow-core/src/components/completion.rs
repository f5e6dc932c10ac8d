use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display text shown for link templates without a label.
pub const NO_LABEL: &str = "No label";

/// One selectable value for a completable configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionOption {
    pub text: String,
    pub id: String,
    /// `None` when the listing carries no description at all,
    /// `Some(None)` when the remote sent an explicit null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl CompletionOption {
    pub fn new(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }
}

/// How a listing item is turned into a [`CompletionOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingMapping {
    /// `name` is both label and value, `description` is passed along.
    Named,
    /// Label `"<name>: <description>"`, value `name`.
    Summarized,
    /// Label `label` (or "No label"), value `id`, `description` passed along.
    Labelled,
    /// Label `description`, value `id`.
    Described,
}

impl ListingMapping {
    pub fn map(&self, item: &Map<String, Value>) -> CompletionOption {
        match self {
            ListingMapping::Named => {
                let name = field_text(item, "name");
                CompletionOption::new(name.clone(), name)
                    .with_description(field_opt(item, "description"))
            }
            ListingMapping::Summarized => CompletionOption::new(
                format!(
                    "{}: {}",
                    field_text(item, "name"),
                    field_text(item, "description")
                ),
                field_text(item, "name"),
            ),
            ListingMapping::Labelled => {
                let label = field_text(item, "label");
                let text = if label.trim().is_empty() {
                    NO_LABEL.to_string()
                } else {
                    label
                };
                CompletionOption::new(text, field_text(item, "id"))
                    .with_description(field_opt(item, "description"))
            }
            ListingMapping::Described => {
                CompletionOption::new(field_text(item, "description"), field_text(item, "id"))
            }
        }
    }
}

/// Missing and null fields render as the empty string; numbers as their JSON text.
fn field_text(item: &Map<String, Value>, key: &str) -> String {
    field_opt(item, key).unwrap_or_default()
}

fn field_opt(item: &Map<String, Value>, key: &str) -> Option<String> {
    match item.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
