//! The movie / show / game tagged union.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tracktogether_core::error::AppError;

/// Which catalog an entry or item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A film.
    Movie,
    /// A TV series.
    Show,
    /// A video game.
    Game,
}

impl MediaKind {
    /// All kinds, in feed order.
    pub const ALL: [MediaKind; 3] = [Self::Movie, Self::Show, Self::Game];

    /// Whether this kind's catalog schema carries a poster-style image.
    pub fn has_poster(self) -> bool {
        !matches!(self, Self::Game)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => f.write_str("movie"),
            Self::Show => f.write_str("show"),
            Self::Game => f.write_str("game"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "show" | "shows" | "tv" => Ok(Self::Show),
            "game" | "games" => Ok(Self::Game),
            other => Err(AppError::validation(format!("Unknown media kind '{other}'"))),
        }
    }
}

/// Kind-specific details, decided once when a catalog entry is ingested.
///
/// Serialized with a `type` tag of `Movie`, `Show` or `Game`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Media {
    /// A film.
    #[serde(rename_all = "camelCase")]
    Movie {
        /// ISO 639-1 original language.
        #[serde(default)]
        original_language: Option<String>,
    },
    /// A TV series.
    #[serde(rename_all = "camelCase")]
    Show {
        /// Countries the show originates from.
        #[serde(default)]
        origin_country: Vec<String>,
    },
    /// A video game.
    #[serde(rename_all = "camelCase")]
    Game {
        /// Platforms the game is released on.
        #[serde(default)]
        platforms: Vec<String>,
    },
}

impl Media {
    /// The kind this variant belongs to.
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie { .. } => MediaKind::Movie,
            Self::Show { .. } => MediaKind::Show,
            Self::Game { .. } => MediaKind::Game,
        }
    }

    /// Variant of `kind` with no details.
    pub fn bare(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => Self::Movie {
                original_language: None,
            },
            MediaKind::Show => Self::Show {
                origin_country: Vec::new(),
            },
            MediaKind::Game => Self::Game {
                platforms: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_aliases() {
        assert_eq!("TV".parse::<MediaKind>().expect("alias"), MediaKind::Show);
        assert_eq!("games".parse::<MediaKind>().expect("plural"), MediaKind::Game);
        assert!("book".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_only_games_lack_posters() {
        assert!(MediaKind::Movie.has_poster());
        assert!(MediaKind::Show.has_poster());
        assert!(!MediaKind::Game.has_poster());
    }

    #[test]
    fn test_media_is_type_tagged() {
        let json = serde_json::to_value(Media::bare(MediaKind::Show)).expect("serialize");
        assert_eq!(json["type"], "Show");
        assert_eq!(json["originCountry"], serde_json::json!([]));
    }
}
