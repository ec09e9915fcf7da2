use serde::{Deserialize, Serialize};

use super::{require_non_empty, Entity, Record};
use crate::errors::AppError;
use crate::store::Collection;

pub type Experience = Record<ExperienceData>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceData {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Free-form date range, e.g. "2022 - Present".
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<ExperienceData> for ExperiencePatch {
    fn from(data: ExperienceData) -> Self {
        Self {
            title: Some(data.title),
            company: Some(data.company),
            location: Some(data.location),
            period: Some(data.period),
            description: Some(data.description),
            tech: Some(data.tech),
            order: Some(data.order),
        }
    }
}

impl Entity for ExperienceData {
    type Patch = ExperiencePatch;

    const COLLECTION: Collection = Collection::Experience;

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("company", &self.company)
    }

    fn validate_patch(patch: &ExperiencePatch) -> Result<(), AppError> {
        if let Some(title) = &patch.title {
            require_non_empty("title", title)?;
        }
        if let Some(company) = &patch.company {
            require_non_empty("company", company)?;
        }
        Ok(())
    }
}
