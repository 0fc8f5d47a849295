//! Invitation lifecycle: send, accept, decline and the inbox.

pub mod service;

pub use service::InvitationService;
