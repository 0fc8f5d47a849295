//! # tracktogether-auth
//!
//! The identity boundary. [`IdentityProvider`] is what the rest of the
//! workspace depends on; [`LocalIdentityProvider`] implements it with
//! Argon2id-hashed credentials kept in the document store.

pub mod local;
pub mod password;
pub mod provider;

pub use local::LocalIdentityProvider;
pub use password::{PasswordHasher, PasswordPolicy};
pub use provider::IdentityProvider;
