//! Native document shape of the store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::DocumentPath;
use crate::error::AppError;
use crate::result::AppResult;

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// A document read from the store together with its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Where the document lives.
    pub path: DocumentPath,
    /// The document fields.
    pub data: Document,
}

impl DocumentSnapshot {
    /// Create a snapshot.
    pub fn new(path: DocumentPath, data: Document) -> Self {
        Self { path, data }
    }

    /// The document id (last path segment).
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Decode the document into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Serialization,
                format!("Malformed document at {}: {e}", self.path),
                e,
            )
        })
    }
}

/// Encode a typed value as a document. Fails unless it serializes to an object.
pub fn encode<T: Serialize>(value: &T) -> AppResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::serialization(format!(
            "Expected a JSON object, got {other}"
        ))),
    }
}
