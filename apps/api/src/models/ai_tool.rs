use serde::{Deserialize, Serialize};

use super::{require_non_empty, Entity, Record};
use crate::errors::AppError;
use crate::store::Collection;

/// Catalog entry for the "AI tools" section. Unrelated to the chat assistant.
pub type AiTool = Record<AiToolData>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiToolData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-text label, not a category id.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<AiToolData> for AiToolPatch {
    fn from(data: AiToolData) -> Self {
        Self {
            name: Some(data.name),
            description: Some(data.description),
            tagline: Some(data.tagline),
            icon: data.icon,
            image: data.image,
            category: Some(data.category),
            url: Some(data.url),
            featured: Some(data.featured),
            order: Some(data.order),
        }
    }
}

impl Entity for AiToolData {
    type Patch = AiToolPatch;

    const COLLECTION: Collection = Collection::AiTools;

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("name", &self.name)
    }

    fn validate_patch(patch: &AiToolPatch) -> Result<(), AppError> {
        match &patch.name {
            Some(name) => require_non_empty("name", name),
            None => Ok(()),
        }
    }
}
