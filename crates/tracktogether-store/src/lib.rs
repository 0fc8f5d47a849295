//! # tracktogether-store
//!
//! Document store backend and typed repositories.
//!
//! [`memory::MemoryDocumentStore`] implements the
//! [`DocumentStore`](tracktogether_core::traits::DocumentStore) boundary in
//! process, with an optional JSON snapshot file. The repositories map the
//! domain entities onto store paths:
//!
//! | path | document |
//! |---|---|
//! | `users/{userId}` | [`User`](tracktogether_entity::User) profile |
//! | `users/{userId}/invitations/{id}` | [`Invitation`](tracktogether_entity::Invitation) |
//! | `lists/{listId}` | [`TrackedList`](tracktogether_entity::TrackedList) |
//! | `lists/{listId}/items/{id}` | [`Item`](tracktogether_entity::Item) |

pub mod memory;
pub mod repositories;

pub use memory::MemoryDocumentStore;
pub use repositories::invitation::InvitationStream;
pub use repositories::{InvitationRepository, ItemRepository, ListRepository, UserDirectory};
