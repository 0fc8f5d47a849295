//! Hierarchical store paths.
//!
//! A path is a sequence of alternating collection / document-id segments,
//! e.g. `lists/{list_id}/items/{item_id}`. Collection paths have an odd
//! number of segments, document paths an even number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Path to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionPath(Vec<String>);

/// Path to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(Vec<String>);

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// The document with `id` inside this collection.
    pub fn doc(&self, id: impl ToString) -> DocumentPath {
        let mut segments = self.0.clone();
        segments.push(id.to_string());
        DocumentPath(segments)
    }

    /// The last segment (the collection name).
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Whether `doc` is a direct child of this collection.
    pub fn contains(&self, doc: &DocumentPath) -> bool {
        doc.0.len() == self.0.len() + 1 && doc.0.starts_with(&self.0)
    }
}

impl DocumentPath {
    /// A sub-collection nested under this document.
    pub fn collection(&self, name: impl Into<String>) -> CollectionPath {
        let mut segments = self.0.clone();
        segments.push(name.into());
        CollectionPath(segments)
    }

    /// The document id (last segment).
    pub fn id(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// The collection that holds this document.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath(self.0[..self.0.len().saturating_sub(1)].to_vec())
    }

    /// Whether this document lives anywhere below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &DocumentPath) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

fn split_segments(raw: &str) -> Result<Vec<String>, AppError> {
    let segments: Vec<String> = raw.split('/').map(str::to_string).collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::validation(format!(
            "Path '{raw}' contains an empty segment"
        )));
    }
    Ok(segments)
}

impl FromStr for CollectionPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(s)?;
        if segments.len() % 2 == 0 {
            return Err(AppError::validation(format!(
                "'{s}' is not a collection path"
            )));
        }
        Ok(Self(segments))
    }
}

impl FromStr for DocumentPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(s)?;
        if segments.len() % 2 != 0 {
            return Err(AppError::validation(format!("'{s}' is not a document path")));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl TryFrom<String> for CollectionPath {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self {
        path.to_string()
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.to_string()
    }
}
