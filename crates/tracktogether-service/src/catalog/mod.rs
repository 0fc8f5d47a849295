//! Catalog browsing and adding catalog entries to lists.

pub mod service;

pub use service::CatalogService;
