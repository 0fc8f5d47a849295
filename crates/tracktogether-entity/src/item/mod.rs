//! List item entities.

pub mod media;
pub mod model;

pub use media::{Media, MediaKind};
pub use model::{DEFAULT_DESCRIPTION, Item, NewItem};
