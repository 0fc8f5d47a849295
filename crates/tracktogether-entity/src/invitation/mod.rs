//! Invitation domain entities.

pub mod model;
pub mod status;

pub use model::Invitation;
pub use status::InvitationStatus;
