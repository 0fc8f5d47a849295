//! In-process document store.

pub mod store;
pub mod subscription;

pub use store::MemoryDocumentStore;
