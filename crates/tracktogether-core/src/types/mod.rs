//! Core type definitions used across the TrackTogether workspace.

pub mod document;
pub mod filter;
pub mod id;
pub mod path;

pub use document::{Document, DocumentSnapshot, encode};
pub use filter::{FieldFilter, matches_all};
pub use id::*;
pub use path::{CollectionPath, DocumentPath};
