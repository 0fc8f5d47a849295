//! Catalog search results, normalized at ingestion.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::item::{Media, MediaKind, NewItem};

/// One result from the external movie/show/game catalogs.
///
/// Catalog-specific field names (`title` vs `name`, `release_date` vs
/// `first_air_date` vs `released`) are resolved when the entry is built,
/// so nothing downstream re-infers the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier in the originating catalog.
    pub external_id: String,
    /// Display title.
    pub title: String,
    /// Release or first-air date.
    pub release_date: Option<NaiveDate>,
    /// Average rating.
    pub rating: Option<f64>,
    /// Synopsis.
    pub overview: Option<String>,
    /// Absolute image URL, if the catalog has one.
    pub image_url: Option<String>,
    /// Kind-specific details.
    pub media: Media,
}

impl CatalogEntry {
    /// The entry's kind.
    pub fn kind(&self) -> MediaKind {
        self.media.kind()
    }

    /// Convert into an item ready to be added to a list.
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            title: self.title.clone(),
            release_year: self.release_date.map(|d| d.year()),
            rating: self.rating,
            description: self.overview.clone(),
            media: self.media.clone(),
        }
    }
}
