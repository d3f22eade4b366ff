//! Field rules applied before anything is written.
//!
//! Both `title` and `content` are required strings, trimmed of surrounding
//! whitespace, and must be non-empty after trimming. The rules are the same
//! on create and on update; on update they apply only to supplied fields.

use crate::model::{NewNote, NotePatch, NoteUpdate};
use std::fmt;

/// A create request that passed validation. Fields are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    pub title: String,
    pub content: String,
}

/// A field covered by the validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
        }
    }
}

/// One or more required fields were missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    fields: Vec<Field>,
}

impl ValidationError {
    fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Note validation failed: ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{0}: {0} is required", field.name())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a create request. Every failing field is reported at once.
pub fn validate_new(input: NewNote) -> Result<ValidNote, ValidationError> {
    let title = trimmed(input.title);
    let content = trimmed(input.content);

    match (title, content) {
        (Some(title), Some(content)) => Ok(ValidNote { title, content }),
        (title, content) => {
            let mut failed = Vec::with_capacity(2);
            if title.is_none() {
                failed.push(Field::Title);
            }
            if content.is_none() {
                failed.push(Field::Content);
            }
            Err(ValidationError::new(failed))
        }
    }
}

/// Validate an update. Absent fields stay absent; an explicit `null` is
/// rejected like a missing required field; supplied strings are trimmed and
/// must not be blank.
pub fn validate_patch(update: NoteUpdate) -> Result<NotePatch, ValidationError> {
    let mut failed = Vec::new();
    let mut check = |raw: Option<Option<String>>, field: Field| match raw {
        None => None,
        Some(value) => {
            let value = trimmed(value);
            if value.is_none() {
                failed.push(field);
            }
            value
        }
    };

    let title = check(update.title, Field::Title);
    let content = check(update.content, Field::Content);

    if failed.is_empty() {
        Ok(NotePatch { title, content })
    } else {
        Err(ValidationError::new(failed))
    }
}
