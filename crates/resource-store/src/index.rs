//! # Composite Index Declarations
//!
//! Index definitions are declared once by an administrative tool and kept by the collection's
//! actor. Declaring an index that already exists is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// How a field participates in a composite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexMode {
    Ascending,
    Descending,
    ArrayContains,
}

impl Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndexMode::Ascending => "ASC",
            IndexMode::Descending => "DESC",
            IndexMode::ArrayContains => "ARRAY_CONTAINS",
        };
        f.write_str(label)
    }
}

/// One field of a composite index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexField {
    pub field_path: String,
    pub mode: IndexMode,
}

/// A composite index over one collection.
///
/// ```rust
/// use resource_store::{IndexDefinition, IndexMode};
///
/// let index = IndexDefinition::new("clinics")
///     .field("address.country", IndexMode::Ascending)
///     .field("rating", IndexMode::Descending);
/// assert_eq!(index.to_string(), "clinics(address.country ASC, rating DESC)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    pub collection_id: String,
    pub fields: Vec<IndexField>,
}

impl IndexDefinition {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field to the index, keeping declaration order.
    pub fn field(mut self, field_path: impl Into<String>, mode: IndexMode) -> Self {
        self.fields.push(IndexField {
            field_path: field_path.into(),
            mode,
        });
        self
    }
}

impl Display for IndexDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.collection_id)?;
        for (position, field) in self.fields.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", field.field_path, field.mode)?;
        }
        f.write_str(")")
    }
}
