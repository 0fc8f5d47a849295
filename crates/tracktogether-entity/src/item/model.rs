//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tracktogether_core::error::AppError;
use tracktogether_core::types::ItemId;

use super::media::{Media, MediaKind};

/// Description stored when the catalog has none.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// A movie, show or game saved to a list, stored at `lists/{list}/items/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Release (or first air) year.
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Average catalog rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Synopsis.
    pub description: String,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
    /// Kind-specific details, tagged by `type`.
    #[serde(flatten)]
    pub media: Media,
}

impl Item {
    /// The item's kind.
    pub fn kind(&self) -> MediaKind {
        self.media.kind()
    }
}

/// Data required to add an item to a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Display title. Must not be blank.
    pub title: String,
    /// Release year.
    pub release_year: Option<i32>,
    /// Average catalog rating.
    pub rating: Option<f64>,
    /// Synopsis; defaults to [`DEFAULT_DESCRIPTION`].
    pub description: Option<String>,
    /// Kind-specific details.
    pub media: Media,
}

impl NewItem {
    /// A bare item of `kind` with only a title.
    pub fn titled(kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_year: None,
            rating: None,
            description: None,
            media: Media::bare(kind),
        }
    }

    /// Validate and turn into a stored item.
    pub fn into_item(self, now: DateTime<Utc>) -> Result<Item, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Item must have a title"));
        }
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Ok(Item {
            id: ItemId::new(),
            title: title.to_string(),
            release_year: self.release_year,
            rating: self.rating,
            description,
            created_at: now,
            media: self.media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracktogether_core::ErrorKind;

    #[test]
    fn test_blank_title_rejected() {
        let err = NewItem::titled(MediaKind::Movie, "  ")
            .into_item(Utc::now())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_missing_description_gets_default() {
        let item = NewItem::titled(MediaKind::Game, "Portal 2")
            .into_item(Utc::now())
            .expect("valid item");
        assert_eq!(item.description, DEFAULT_DESCRIPTION);
        assert_eq!(item.kind(), MediaKind::Game);
    }

    #[test]
    fn test_item_document_shape() {
        let mut new = NewItem::titled(MediaKind::Movie, "Heat");
        new.release_year = Some(1995);
        new.media = Media::Movie {
            original_language: Some("en".into()),
        };
        let item = new.into_item(Utc::now()).expect("valid item");
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["type"], "Movie");
        assert_eq!(json["releaseYear"], 1995);
        assert_eq!(json["originalLanguage"], "en");

        let back: Item = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, item);
    }
}
