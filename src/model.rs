use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque note identifier assigned by the store on creation.
///
/// The inner string is whatever the backend hands out (a UUID for the
/// in-memory store, an ObjectId hex string for MongoDB). Callers must not
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        NoteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        NoteId(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        NoteId(value.to_string())
    }
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// Create input as received from a client. Fields may be absent; the
/// validator decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewNote {
    pub fn new<T: Into<String>, C: Into<String>>(title: T, content: C) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Update input as received from a client. Each field has three states:
/// absent (`None`), explicit `null` (`Some(None)`) and a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
}

/// Only called when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<NotePatch> for NoteUpdate {
    fn from(patch: NotePatch) -> Self {
        Self {
            title: patch.title.map(Some),
            content: patch.content.map(Some),
        }
    }
}

/// Validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the supplied fields to `note` in place.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            note.content.clone_from(content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_without_internal_fields() {
        let note = Note {
            id: NoteId::new("abc"),
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "abc", "title": "Groceries", "content": "Milk, eggs"})
        );
    }

    #[test]
    fn update_distinguishes_absent_null_and_value() {
        let update: NoteUpdate =
            serde_json::from_str(r#"{"title": null, "content": "x", "pinned": true}"#).unwrap();
        assert_eq!(update.title, Some(None));
        assert_eq!(update.content, Some(Some("x".to_string())));

        let update: NoteUpdate = serde_json::from_str(r#"{"content": "x"}"#).unwrap();
        assert_eq!(update.title, None);
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let mut note = Note {
            id: NoteId::new("1"),
            title: "a".to_string(),
            content: "b".to_string(),
        };
        NotePatch::default().content("c").apply_to(&mut note);
        assert_eq!(note.title, "a");
        assert_eq!(note.content, "c");
        assert_eq!(note.id.as_str(), "1");
    }
}
