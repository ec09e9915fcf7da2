use std::sync::Arc;

use tracing::{info, warn};

use super::WorkingSet;
use crate::errors::AppError;
use crate::models::{
    from_document, to_document_data, AiToolData, CategoryData, Entity, ExperienceData,
    ProjectData, Record, SkillData,
};
use crate::store::{Document, DocumentStore};

/// Full read/write access to every collection.
///
/// Writes validate before touching the store. `update` on a missing id fails
/// with a not-found store error; `delete` on a missing id is a no-op.
#[derive(Clone)]
pub struct AdminContent {
    store: Arc<dyn DocumentStore>,
}

impl AdminContent {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Inserts a new record and returns its store-assigned id.
    pub async fn add<E: Entity>(&self, record: &E) -> Result<String, AppError> {
        record.validate()?;
        let data = to_document_data(record)?;
        let id = self.store.insert(E::COLLECTION, data).await?;
        info!("Added {}/{id}", E::COLLECTION);
        Ok(id)
    }

    /// Merges the supplied fields into an existing record.
    pub async fn update<E: Entity>(&self, id: &str, patch: &E::Patch) -> Result<(), AppError> {
        E::validate_patch(patch)?;
        let data = to_document_data(patch)?;
        self.store.merge(E::COLLECTION, id, data).await?;
        info!("Updated {}/{id}", E::COLLECTION);
        Ok(())
    }

    pub async fn delete<E: Entity>(&self, id: &str) -> Result<(), AppError> {
        self.store.remove(E::COLLECTION, id).await?;
        info!("Deleted {}/{id}", E::COLLECTION);
        Ok(())
    }

    /// All records of one collection in display order. Documents that do not
    /// match the record shape are logged and skipped.
    pub async fn get_all<E: Entity>(&self) -> Result<Vec<Record<E>>, AppError> {
        let docs = self.store.list(E::COLLECTION).await?;
        Ok(decode_all(docs))
    }

    pub async fn get_by_id<E: Entity>(&self, id: &str) -> Result<Option<Record<E>>, AppError> {
        match self.store.get(E::COLLECTION, id).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetches every collection concurrently. Any single failure fails the load.
    pub async fn load_working_set(&self) -> Result<WorkingSet, AppError> {
        let (projects, categories, skills, experience, ai_tools) = tokio::try_join!(
            self.get_all::<ProjectData>(),
            self.get_all::<CategoryData>(),
            self.get_all::<SkillData>(),
            self.get_all::<ExperienceData>(),
            self.get_all::<AiToolData>(),
        )?;

        Ok(WorkingSet {
            projects,
            categories,
            skills,
            experience,
            ai_tools,
        })
    }
}

fn decode_all<E: Entity>(docs: Vec<Document>) -> Vec<Record<E>> {
    docs.into_iter()
        .filter_map(|doc| match from_document(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping document: {e}");
                None
            }
        })
        .collect()
}
