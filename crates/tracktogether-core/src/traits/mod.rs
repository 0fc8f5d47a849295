//! Core traits defined in `tracktogether-core` and implemented by other crates.

pub mod document_store;

pub use document_store::{
    DocumentStore, SnapshotStream, Subscription, Unsubscribe, WriteBatch, WriteOp,
};
