//! Typed portfolio records and the conversion to/from raw store documents.
//!
//! Every entity is stored as `Record<T>`: the store-assigned `id` plus the
//! entity body `T`. The body type doubles as the "record without id" payload
//! for inserts, and each body has a companion `Patch` type whose `None` fields
//! are left untouched by an update.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::store::{Collection, Document, DocumentData, StoreError};

pub mod ai_tool;
pub mod experience;
pub mod project;
pub mod skill;

pub use ai_tool::{AiTool, AiToolData};
pub use experience::{Experience, ExperienceData};
pub use project::{Project, ProjectData};
pub use skill::{Category, CategoryData, Skill, SkillData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

/// A document body that lives in one store collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    type Patch: Serialize + DeserializeOwned + Default + From<Self> + Send + Sync + 'static;

    const COLLECTION: Collection;

    /// Checks a full record before it is inserted.
    fn validate(&self) -> Result<(), AppError>;

    /// Checks only the fields a patch carries.
    fn validate_patch(patch: &Self::Patch) -> Result<(), AppError>;
}

/// Serializes a body or patch into a JSON object for the store.
pub fn to_document_data<T: Serialize>(value: &T) -> Result<DocumentData, AppError> {
    match serde_json::to_value(value).map_err(|e| AppError::Internal(e.into()))? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(AppError::Internal(anyhow::anyhow!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Deserializes a raw store document into a typed record.
pub fn from_document<T: Entity>(doc: Document) -> Result<Record<T>, StoreError> {
    let Document { id, mut data } = doc;
    data.insert("id".to_string(), Value::String(id.clone()));
    serde_json::from_value(Value::Object(data)).map_err(|e| StoreError::Malformed {
        collection: T::COLLECTION,
        id,
        reason: e.to_string(),
    })
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}
