//! Product record and identifier

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a product
///
/// Catalog documents carry ids either as JSON numbers or strings; both are
/// normalised to their string form so `7` and `"7"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ProductId(n.to_string()),
            RawId::Text(s) => ProductId(s),
        })
    }
}

/// A single catalog entry, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Image reference (URL or relative path), carried through for display
    pub image: String,
    pub description: String,
}

impl Product {
    /// Build a product with empty brand and image fields (used heavily in tests)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            brand: String::new(),
            category: category.into(),
            image: String::new(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_normalise() {
        let a: Product = serde_json::from_str(
            r#"{"id": 7, "name": "A", "brand": "B", "category": "c", "image": "a.png", "description": "d"}"#,
        )
        .unwrap();
        let b: Product = serde_json::from_str(
            r#"{"id": "7", "name": "A", "brand": "B", "category": "c", "image": "a.png", "description": "d"}"#,
        )
        .unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(a.id.as_str(), "7");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<Product, _> = serde_json::from_str(r#"{"id": 1, "name": "A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
