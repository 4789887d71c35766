use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::{FieldError, ValidationError};

pub const TITLE_MAX_CHARS: usize = 200;

/// An idea as returned by the API.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Idea {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub likes: i64,
    pub created_at: Option<NaiveDateTime>,
}

/// Raw `ideas` row. Tags are still JSON text here.
#[derive(FromRow, Debug, Clone)]
pub struct IdeaRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tags_json: Option<String>,
    pub likes: i64,
    pub created_at: Option<NaiveDateTime>,
}

impl From<IdeaRow> for Idea {
    fn from(row: IdeaRow) -> Self {
        let tags = decode_tags(row.id, row.tags_json.as_deref());
        Idea {
            id: row.id,
            title: row.title,
            description: row.description,
            tags,
            likes: row.likes,
            created_at: row.created_at,
        }
    }
}

/// Request body for creating an idea.
#[derive(Deserialize, Debug, Clone)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A trimmed, checked `NewIdea`. Only `NewIdea::validate` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidIdea {
    title: String,
    description: String,
    tags: Vec<String>,
}

impl ValidIdea {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl NewIdea {
    /// Trims the text fields, drops blank tags and checks field constraints.
    /// Every failing field is reported, not just the first.
    pub fn validate(self) -> Result<ValidIdea, ValidationError> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let mut errors = Vec::new();

        if title.is_empty() {
            errors.push(FieldError::Empty { field: "title" });
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.push(FieldError::TooLong {
                field: "title",
                max: TITLE_MAX_CHARS,
            });
        }
        if description.is_empty() {
            errors.push(FieldError::Empty { field: "description" });
        }

        if let Some(err) = ValidationError::from_errors(errors) {
            return Err(err);
        }

        Ok(ValidIdea {
            title,
            description,
            tags: normalize_tags(self.tags),
        })
    }
}

/// Trims each tag and drops the ones left empty. Order and duplicates are kept.
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn encode_tags(tags: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Missing or malformed tag text decodes to an empty list.
pub fn decode_tags(idea_id: i64, raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(idea_id = %idea_id, error = %e, "Stored tags are not a JSON string array, using empty list");
            Vec::new()
        }
    }
}
