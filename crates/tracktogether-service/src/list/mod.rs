//! List management and the per-user list cache.

pub mod cache;
pub mod service;

pub use cache::{ListCache, ListSnapshot};
pub use service::ListService;
