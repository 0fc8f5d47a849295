//! Mapping from raw catalog payloads to [`CatalogEntry`].

use chrono::NaiveDate;
use serde::Deserialize;

use tracktogether_entity::{CatalogEntry, Media, MediaKind};

/// One page of a TMDB-style listing or search.
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    /// Results on this page.
    #[serde(default)]
    pub results: Vec<TmdbResult>,
}

/// A movie or TV result. Movies use `title`/`release_date`, shows use
/// `name`/`first_air_date`.
#[derive(Debug, Deserialize)]
pub struct TmdbResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

/// One page of a RAWG-style game listing.
#[derive(Debug, Deserialize)]
pub struct RawgPage {
    /// Results on this page.
    #[serde(default)]
    pub results: Vec<RawgGame>,
}

/// A game result.
#[derive(Debug, Deserialize)]
pub struct RawgGame {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<RawgPlatformEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct RawgPlatformEntry {
    pub platform: RawgPlatform,
}

#[derive(Debug, Deserialize)]
pub struct RawgPlatform {
    pub name: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

/// Join a poster path onto the image base URL.
pub fn resolve_poster(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

/// Normalize a TMDB result as `kind` (movie or show). Results without any
/// title are dropped, as is everything when `kind` is a game.
pub fn from_tmdb(result: TmdbResult, kind: MediaKind, image_base_url: &str) -> Option<CatalogEntry> {
    let media = match kind {
        MediaKind::Movie => Media::Movie {
            original_language: non_empty(result.original_language),
        },
        MediaKind::Show => Media::Show {
            origin_country: result.origin_country,
        },
        MediaKind::Game => return None,
    };
    let title = non_empty(result.title).or_else(|| non_empty(result.name))?;
    let release_date = parse_date(
        result
            .release_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(result.first_air_date.as_deref()),
    );

    Some(CatalogEntry {
        external_id: result.id.to_string(),
        title,
        release_date,
        rating: result.vote_average,
        overview: non_empty(result.overview),
        image_url: non_empty(result.poster_path).map(|p| resolve_poster(image_base_url, &p)),
        media,
    })
}

/// Normalize a RAWG game. Results without a name are dropped.
pub fn from_rawg(game: RawgGame) -> Option<CatalogEntry> {
    let title = non_empty(game.name)?;
    let platforms = game
        .platforms
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.platform.name)
        .collect();

    Some(CatalogEntry {
        external_id: game.id.to_string(),
        title,
        release_date: parse_date(game.released.as_deref()),
        rating: game.rating,
        overview: None,
        image_url: non_empty(game.background_image),
        media: Media::Game { platforms },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGES: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_movie_result() {
        let page: TmdbPage = serde_json::from_str(
            r#"{"page":1,"results":[{"id":278,"title":"The Shawshank Redemption",
                "release_date":"1994-09-23","vote_average":8.7,"overview":"Two men.",
                "poster_path":"/q6y0.jpg","original_language":"en"}]}"#,
        )
        .unwrap();
        let entry = page
            .results
            .into_iter()
            .filter_map(|r| from_tmdb(r, MediaKind::Movie, IMAGES))
            .next()
            .unwrap();

        assert_eq!(entry.external_id, "278");
        assert_eq!(entry.release_date, NaiveDate::from_ymd_opt(1994, 9, 23));
        assert_eq!(
            entry.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/q6y0.jpg")
        );
        assert_eq!(
            entry.media,
            Media::Movie {
                original_language: Some("en".into())
            }
        );
    }

    #[test]
    fn test_show_uses_name_and_first_air_date() {
        let result: TmdbResult = serde_json::from_str(
            r#"{"id":1396,"name":"Breaking Bad","first_air_date":"2008-01-20",
                "vote_average":8.9,"poster_path":null,"origin_country":["US"]}"#,
        )
        .unwrap();
        let entry = from_tmdb(result, MediaKind::Show, IMAGES).unwrap();

        assert_eq!(entry.title, "Breaking Bad");
        assert_eq!(entry.release_date, NaiveDate::from_ymd_opt(2008, 1, 20));
        assert!(entry.image_url.is_none());
        assert_eq!(entry.kind(), MediaKind::Show);
    }

    #[test]
    fn test_untitled_and_bad_dates() {
        let untitled: TmdbResult = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert!(from_tmdb(untitled, MediaKind::Movie, IMAGES).is_none());

        let undated: TmdbResult =
            serde_json::from_str(r#"{"id":2,"title":"Soon","release_date":""}"#).unwrap();
        let entry = from_tmdb(undated, MediaKind::Movie, IMAGES).unwrap();
        assert!(entry.release_date.is_none());
        assert!(entry.overview.is_none());
    }

    #[test]
    fn test_game_result() {
        let page: RawgPage = serde_json::from_str(
            r#"{"count":1,"results":[{"id":3498,"name":"Grand Theft Auto V",
                "released":"2013-09-17","rating":4.47,
                "background_image":"https://media.rawg.io/gta.jpg",
                "platforms":[{"platform":{"id":4,"name":"PC"}},
                             {"platform":{"id":187,"name":"PlayStation 5"}}]}]}"#,
        )
        .unwrap();
        let entry = page.results.into_iter().filter_map(from_rawg).next().unwrap();

        assert_eq!(entry.rating, Some(4.47));
        assert_eq!(entry.image_url.as_deref(), Some("https://media.rawg.io/gta.jpg"));
        assert_eq!(
            entry.media,
            Media::Game {
                platforms: vec!["PC".into(), "PlayStation 5".into()]
            }
        );
    }

    #[test]
    fn test_tmdb_result_is_never_a_game() {
        let result: TmdbResult =
            serde_json::from_str(r#"{"id":1,"title":"Portal","poster_path":"/p.jpg"}"#).unwrap();
        assert!(from_tmdb(result, MediaKind::Game, IMAGES).is_none());
    }

    #[test]
    fn test_resolve_poster_joins_once() {
        assert_eq!(resolve_poster("https://img/", "/a.jpg"), "https://img/a.jpg");
        assert_eq!(resolve_poster("https://img", "a.jpg"), "https://img/a.jpg");
    }
}
