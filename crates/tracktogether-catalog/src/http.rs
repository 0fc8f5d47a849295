//! HTTP catalog client over the public movie/show and game APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use tracktogether_core::config::CatalogConfig;
use tracktogether_core::error::{AppError, ErrorKind};
use tracktogether_core::result::AppResult;
use tracktogether_entity::{CatalogEntry, MediaKind};

use crate::client::CatalogClient;
use crate::ingest::{self, RawgPage, TmdbPage};

/// Catalog client issuing one GET per call.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl HttpCatalogClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { http, config })
    }

    fn movie_url(&self, path: &str, query: Option<&str>) -> AppResult<Url> {
        let mut params = vec![("api_key", self.config.movie_api_key.clone())];
        if let Some(query) = query {
            params.push(("query", query.to_string()));
        }
        let base = format!(
            "{}/{}",
            self.config.movie_base_url.trim_end_matches('/'),
            path
        );
        Url::parse_with_params(&base, &params).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid movie catalog URL", e)
        })
    }

    fn game_url(&self, search: Option<&str>) -> AppResult<Url> {
        let mut params = vec![
            ("key", self.config.game_api_key.clone()),
            ("page_size", self.config.game_page_size.to_string()),
        ];
        match search {
            Some(text) => params.push(("search", text.to_string())),
            None => params.push(("ordering", "-added".to_string())),
        }
        Url::parse_with_params(&self.config.game_base_url, &params).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid game catalog URL", e)
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "Catalog request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::with_source(ErrorKind::Transient, "Catalog request failed", e))?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Transient, "Catalog response was unreadable", e)
        })
    }

    async fn fetch_tmdb(&self, kind: MediaKind, url: Url) -> AppResult<Vec<CatalogEntry>> {
        let page: TmdbPage = self.fetch(url).await?;
        Ok(page
            .results
            .into_iter()
            .filter_map(|r| ingest::from_tmdb(r, kind, &self.config.image_base_url))
            .collect())
    }

    async fn fetch_rawg(&self, url: Url) -> AppResult<Vec<CatalogEntry>> {
        let page: RawgPage = self.fetch(url).await?;
        Ok(page.results.into_iter().filter_map(ingest::from_rawg).collect())
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn top_rated(&self, kind: MediaKind) -> AppResult<Vec<CatalogEntry>> {
        match kind {
            MediaKind::Movie => {
                let url = self.movie_url("movie/top_rated", None)?;
                self.fetch_tmdb(kind, url).await
            }
            MediaKind::Show => {
                let url = self.movie_url("tv/top_rated", None)?;
                self.fetch_tmdb(kind, url).await
            }
            MediaKind::Game => self.fetch_rawg(self.game_url(None)?).await,
        }
    }

    async fn search(&self, kind: MediaKind, text: &str) -> AppResult<Vec<CatalogEntry>> {
        match kind {
            MediaKind::Movie => {
                let url = self.movie_url("search/movie", Some(text))?;
                self.fetch_tmdb(kind, url).await
            }
            MediaKind::Show => {
                let url = self.movie_url("search/tv", Some(text))?;
                self.fetch_tmdb(kind, url).await
            }
            MediaKind::Game => self.fetch_rawg(self.game_url(Some(text))?).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpCatalogClient {
        let config = CatalogConfig {
            movie_api_key: "mk".into(),
            game_api_key: "gk".into(),
            ..CatalogConfig::default()
        };
        HttpCatalogClient::new(config).unwrap()
    }

    #[test]
    fn test_movie_urls() {
        let client = client();
        let top = client.movie_url("movie/top_rated", None).unwrap();
        assert_eq!(
            top.as_str(),
            "https://api.themoviedb.org/3/movie/top_rated?api_key=mk"
        );
        let search = client.movie_url("search/tv", Some("breaking bad")).unwrap();
        assert_eq!(search.path(), "/3/search/tv");
        assert!(search.query().unwrap().contains("query=breaking+bad"));
    }

    #[test]
    fn test_game_urls() {
        let client = client();
        let top = client.game_url(None).unwrap();
        assert_eq!(
            top.as_str(),
            "https://api.rawg.io/api/games?key=gk&page_size=10&ordering=-added"
        );
        let search = client.game_url(Some("zelda")).unwrap();
        assert!(search.query().unwrap().ends_with("search=zelda"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transient() {
        let config = CatalogConfig {
            movie_base_url: "http://127.0.0.1:9".into(),
            request_timeout_seconds: 1,
            ..CatalogConfig::default()
        };
        let err = HttpCatalogClient::new(config)
            .unwrap()
            .top_rated(MediaKind::Movie)
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
