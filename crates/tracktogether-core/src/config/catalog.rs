//! External content catalog configuration.

use serde::{Deserialize, Serialize};

/// Endpoints and keys for the movie/show and game catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the movie/show catalog API.
    #[serde(default = "default_movie_base_url")]
    pub movie_base_url: String,
    /// API key for the movie/show catalog.
    #[serde(default)]
    pub movie_api_key: String,
    /// Prefix joined with poster paths to build image URLs.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Endpoint of the game catalog listing.
    #[serde(default = "default_game_base_url")]
    pub game_base_url: String,
    /// API key for the game catalog.
    #[serde(default)]
    pub game_api_key: String,
    /// Number of games requested for the popular feed.
    #[serde(default = "default_game_page_size")]
    pub game_page_size: u32,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Image shown for entries whose catalog has no poster.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            movie_base_url: default_movie_base_url(),
            movie_api_key: String::new(),
            image_base_url: default_image_base_url(),
            game_base_url: default_game_base_url(),
            game_api_key: String::new(),
            game_page_size: default_game_page_size(),
            request_timeout_seconds: default_request_timeout(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

fn default_movie_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_game_base_url() -> String {
    "https://api.rawg.io/api/games".to_string()
}

fn default_game_page_size() -> u32 {
    10
}

fn default_request_timeout() -> u64 {
    10
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/150x225?text=No+Image".to_string()
}
