//! List domain entities.

pub mod member;
pub mod model;

pub use member::{MemberStatus, SharedWithEntry};
pub use model::TrackedList;
