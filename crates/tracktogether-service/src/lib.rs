//! # tracktogether-service
//!
//! Use cases of TrackTogether: list management, the invitation lifecycle
//! and catalog browsing. Services receive their collaborators at
//! construction time and take an [`ActorContext`] naming the acting user.

pub mod catalog;
pub mod context;
pub mod invitation;
pub mod list;

mod failure;

pub use catalog::CatalogService;
pub use context::ActorContext;
pub use invitation::InvitationService;
pub use list::{ListCache, ListService, ListSnapshot};
