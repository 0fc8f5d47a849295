//! Typed repositories over the document store.
//!
//! Each repository owns the path layout of one entity and converts between
//! entities and raw documents. Multi-document writes are left to the
//! services, which take paths and encoded documents from here and put them
//! into one [`WriteBatch`](tracktogether_core::traits::WriteBatch).

pub mod invitation;
pub mod item;
pub mod list;
pub mod user;

pub use invitation::InvitationRepository;
pub use item::ItemRepository;
pub use list::ListRepository;
pub use user::UserDirectory;

use serde::de::DeserializeOwned;

use tracktogether_core::result::AppResult;
use tracktogether_core::types::DocumentSnapshot;

/// Decode a result set, failing on the first malformed document.
pub(crate) fn decode_all<T: DeserializeOwned>(snaps: &[DocumentSnapshot]) -> AppResult<Vec<T>> {
    snaps.iter().map(DocumentSnapshot::decode).collect()
}
