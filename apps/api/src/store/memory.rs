//! In-process document store.
//!
//! Used when no `DATABASE_URL` is configured and throughout the test suite.
//! Mirrors the Postgres backend's semantics exactly. It can be flipped into an
//! "unreachable" mode to exercise the degradation paths, and it counts list
//! queries per collection so callers can assert on reload behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{sort_documents, Collection, Document, DocumentData, DocumentStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, HashMap<String, DocumentData>>>,
    unavailable: AtomicBool,
    list_calls: [AtomicUsize; 5],
}

fn slot(collection: Collection) -> usize {
    match collection {
        Collection::Projects => 0,
        Collection::Categories => 1,
        Collection::Skills => 2,
        Collection::Experience => 3,
        Collection::AiTools => 4,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the store becoming unreachable (or reachable again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `list` queries issued against `collection` so far.
    pub fn list_calls(&self, collection: Collection) -> usize {
        self.list_calls[slot(collection)].load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Read("store unreachable".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Write("store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        data: DocumentData,
    ) -> Result<String, StoreError> {
        self.check_write()?;
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.clone(), data);
        debug!("memory store: inserted {collection}/{id}");
        Ok(id)
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut guard = self.collections.write().await;
        let existing = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;
        for (key, value) in patch {
            existing.insert(key, value);
        }
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.check_write()?;
        if let Some(docs) = self.collections.write().await.get_mut(&collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        self.list_calls[slot(collection)].fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        let guard = self.collections.read().await;
        let mut docs: Vec<Document> = guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        sort_documents(&mut docs, collection.sort_direction());
        Ok(docs)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_read()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }
}
