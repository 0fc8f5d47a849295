//! # tracktogether-entity
//!
//! Domain entity models for TrackTogether. Every struct in this crate is
//! either a stored document shape (serialized in camelCase, the store's
//! native field naming) or a value object passed between services.

pub mod catalog;
pub mod invitation;
pub mod item;
pub mod list;
pub mod user;

pub use catalog::CatalogEntry;
pub use invitation::{Invitation, InvitationStatus};
pub use item::{Item, Media, MediaKind, NewItem};
pub use list::{MemberStatus, SharedWithEntry, TrackedList};
pub use user::User;
