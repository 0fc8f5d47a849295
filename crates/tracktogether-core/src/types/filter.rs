//! Equality filters for collection queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Document;

/// A single `field == value` condition on a top-level document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// The field name to filter on.
    pub field: String,
    /// The value the field must equal.
    pub value: Value,
}

impl FieldFilter {
    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether `doc` satisfies this condition. Missing fields never match.
    pub fn matches(&self, doc: &Document) -> bool {
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Whether `doc` satisfies every filter in `filters`.
pub fn matches_all(filters: &[FieldFilter], doc: &Document) -> bool {
    filters.iter().all(|f| f.matches(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn test_eq_matches_exact_value() {
        let d = doc(json!({"email": "u2@x.com", "status": "pending"}));
        assert!(FieldFilter::eq("email", "u2@x.com").matches(&d));
        assert!(!FieldFilter::eq("email", "U2@x.com").matches(&d));
        assert!(!FieldFilter::eq("missing", "x").matches(&d));
    }

    #[test]
    fn test_matches_all_requires_every_filter() {
        let d = doc(json!({"listId": "l1", "status": "pending"}));
        let filters = [
            FieldFilter::eq("listId", "l1"),
            FieldFilter::eq("status", "accepted"),
        ];
        assert!(!matches_all(&filters, &d));
        assert!(matches_all(&filters[..1], &d));
        assert!(matches_all(&[], &d));
    }
}
