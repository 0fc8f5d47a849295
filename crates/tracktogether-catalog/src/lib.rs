//! # tracktogether-catalog
//!
//! Read-only access to the external content catalogs. Movies and shows come
//! from a TMDB-style API, games from a RAWG-style API. Raw payloads are
//! normalized into [`CatalogEntry`](tracktogether_entity::CatalogEntry)
//! values in [`ingest`], so the media kind is decided exactly once.

pub mod client;
pub mod http;
pub mod ingest;

pub use client::CatalogClient;
pub use http::HttpCatalogClient;
