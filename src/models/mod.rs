use chrono::{DateTime, Utc};
use tokio_postgres::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Row> for Note {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Validated input of a create or update.
///
/// The title is guaranteed non-empty and a missing content is stored as `''`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: String,
}

impl NoteDraft {
    /// Returns `None` when the title is absent or empty.
    pub fn new(title: Option<String>, content: Option<String>) -> Option<Self> {
        let title = title.filter(|title| !title.is_empty())?;

        Some(Self {
            title,
            content: content.unwrap_or_default(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_title() {
        assert_eq!(NoteDraft::new(None, Some("body".to_string())), None);
        assert_eq!(NoteDraft::new(Some(String::new()), None), None);
    }

    #[test]
    fn draft_defaults_missing_content_to_empty() {
        let draft = NoteDraft::new(Some("Groceries".to_string()), None).unwrap();

        assert_eq!(draft.title(), "Groceries");
        assert_eq!(draft.content(), "");
    }

    #[test]
    fn draft_keeps_whitespace_title() {
        let draft = NoteDraft::new(Some("  ".to_string()), Some("x".to_string())).unwrap();

        assert_eq!(draft.title(), "  ");
        assert_eq!(draft.content(), "x");
    }
}
