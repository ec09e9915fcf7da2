//! Document store client.
//!
//! The portfolio content lives in five schema-flexible collections keyed by a
//! store-assigned id. Everything above this module talks to the store through
//! the `DocumentStore` trait, so the backend (Postgres JSONB or in-memory) can
//! be swapped at startup without touching the content layer.
//!
//! Semantics shared by every backend:
//! - `insert` assigns a fresh UUID v4 id; ids never change afterwards.
//! - `merge` is a shallow patch: top-level keys in the patch replace the stored
//!   ones, everything else is left untouched. Merging into a missing id fails
//!   with `StoreError::NotFound`.
//! - `remove` is idempotent: removing a missing id succeeds.
//! - `list` is ordered by the numeric `order` field in the collection's
//!   direction, ties broken by id ascending.

use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// JSON object body of a stored document (without its id).
pub type DocumentData = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Categories,
    Skills,
    Experience,
    AiTools,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Projects,
        Collection::Categories,
        Collection::Skills,
        Collection::Experience,
        Collection::AiTools,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Categories => "categories",
            Collection::Skills => "skills",
            Collection::Experience => "experience",
            Collection::AiTools => "aitools",
        }
    }

    /// Experience is listed most recent first; everything else ascending.
    pub fn sort_direction(self) -> SortDirection {
        match self {
            Collection::Experience => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A raw document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: DocumentData,
}

impl Document {
    /// Numeric `order` field as a double, matching the Postgres cast;
    /// documents without one sort as 0.
    pub fn order_key(&self) -> f64 {
        self.data
            .get("order")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

/// Sorts documents by `order` in `direction`, ties by id ascending.
pub fn sort_documents(docs: &mut [Document], direction: SortDirection) {
    docs.sort_by(|a, b| {
        let by_order = a.order_key().total_cmp(&b.order_key());
        let by_order = match direction {
            SortDirection::Ascending => by_order,
            SortDirection::Descending => by_order.reverse(),
        };
        match by_order {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        }
    });
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("{collection}/{id} not found")]
    NotFound { collection: Collection, id: String },

    #[error("malformed document {collection}/{id}: {reason}")]
    Malformed {
        collection: Collection,
        id: String,
        reason: String,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document and returns its generated id.
    async fn insert(&self, collection: Collection, data: DocumentData)
        -> Result<String, StoreError>;

    /// Shallow-merges `patch` into an existing document.
    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<(), StoreError>;

    /// Hard-deletes a document. Missing ids are not an error.
    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    /// All documents of a collection in its canonical order.
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;
}
