//! List envelopes and records as returned by the record-store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bookkeeping fields the record-store adds to every record.
pub const INTERNAL_FIELDS: [&str; 2] = ["collectionId", "collectionName"];

/// A single record: a JSON object of field name to value.
///
/// Deserialization fails for anything that is not an object, so a decoded
/// [`Page<Record>`] is known to have the expected shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Remove the record-store bookkeeping fields. Idempotent.
    pub fn sanitize(&mut self) {
        for field in INTERNAL_FIELDS {
            self.0.remove(field);
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Paginated list envelope: `items` plus whatever metadata the upstream sends
/// (`page`, `perPage`, `totalItems`, `totalPages`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl<T> Page<T> {
    /// Total number of pages, if the upstream reported it.
    pub fn total_pages(&self) -> Option<u64> {
        self.meta.get("totalPages").and_then(Value::as_u64)
    }
}

impl Page<Record> {
    /// Strip bookkeeping fields from every item, keeping the envelope.
    pub fn sanitized(mut self) -> Self {
        for item in &mut self.items {
            item.sanitize();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Page<Record> {
        serde_json::from_value(json!({
            "page": 1,
            "perPage": 30,
            "totalItems": 2,
            "totalPages": 1,
            "items": [
                {
                    "id": "r1",
                    "collectionId": "pbc_123",
                    "collectionName": "recipes",
                    "title": "Shakshuka",
                    "expand": {"author": {"id": "u1", "collectionName": "users"}}
                },
                {"id": "r2", "title": "Dal", "collectionName": "recipes"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_sanitize_removes_internal_fields() {
        let page = sample().sanitized();
        for item in &page.items {
            for field in INTERNAL_FIELDS {
                assert!(!item.contains(field), "{field} leaked");
            }
        }
        assert_eq!(page.items[0].get("title"), Some(&json!("Shakshuka")));
        assert_eq!(
            page.items[0].get("expand"),
            Some(&json!({"author": {"id": "u1", "collectionName": "users"}}))
        );
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sample().sanitized();
        let twice = once.clone().sanitized();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_envelope_metadata_preserved() {
        let page = sample().sanitized();
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], json!(1));
        assert_eq!(value["totalItems"], json!(2));
        assert_eq!(page.total_pages(), Some(1));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        assert!(serde_json::from_value::<Page<Record>>(json!({"items": "nope"})).is_err());
        assert!(serde_json::from_value::<Page<Record>>(json!({"items": [1, 2]})).is_err());
        assert!(serde_json::from_value::<Page<Record>>(json!({"page": 1})).is_err());
    }
}
