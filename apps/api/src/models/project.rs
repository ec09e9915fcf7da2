use serde::{Deserialize, Deserializer, Serialize};

use super::{require_non_empty, Entity, Record};
use crate::errors::AppError;
use crate::store::Collection;

pub type Project = Record<ProjectData>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// The admin form sends a comma-separated string; stored documents hold a list.
    #[serde(default, deserialize_with = "tech_list")]
    pub tech: Vec<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub live: String,
    /// Only featured projects show on the landing page.
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i64,
    /// Soft reference to a category; may dangle after the category is deleted.
    #[serde(default)]
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_passkey: Option<String>,
}

impl ProjectData {
    /// The passkey guarding the presentation, if one is set. Blank passkeys
    /// (what the admin form stores when left empty) count as none.
    pub fn passkey(&self) -> Option<&str> {
        self.presentation_passkey
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    pub fn presentation(&self) -> Option<&str> {
        self.presentation_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_tech_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tech: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_passkey: Option<String>,
}

impl From<ProjectData> for ProjectPatch {
    fn from(data: ProjectData) -> Self {
        Self {
            title: Some(data.title),
            description: Some(data.description),
            image: Some(data.image),
            tech: Some(data.tech),
            github: Some(data.github),
            live: Some(data.live),
            featured: Some(data.featured),
            order: Some(data.order),
            category_id: Some(data.category_id),
            // An edit form submits blanks for cleared optional links
            presentation_url: Some(data.presentation_url.unwrap_or_default()),
            documentation_url: Some(data.documentation_url.unwrap_or_default()),
            readme_content: Some(data.readme_content.unwrap_or_default()),
            presentation_passkey: Some(data.presentation_passkey.unwrap_or_default()),
        }
    }
}

impl Entity for ProjectData {
    type Patch = ProjectPatch;

    const COLLECTION: Collection = Collection::Projects;

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("categoryId", &self.category_id)
            .map_err(|_| AppError::Validation("Please select a category".to_string()))
    }

    fn validate_patch(patch: &ProjectPatch) -> Result<(), AppError> {
        if let Some(title) = &patch.title {
            require_non_empty("title", title)?;
        }
        if let Some(category_id) = &patch.category_id {
            require_non_empty("categoryId", category_id)
                .map_err(|_| AppError::Validation("Please select a category".to_string()))?;
        }
        Ok(())
    }
}

/// Splits the comma-separated tech field of the admin form.
pub fn parse_tech_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTech {
    List(Vec<String>),
    Text(String),
}

impl From<RawTech> for Vec<String> {
    fn from(raw: RawTech) -> Self {
        match raw {
            RawTech::List(list) => list,
            RawTech::Text(text) => parse_tech_list(&text),
        }
    }
}

fn tech_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    RawTech::deserialize(deserializer).map(Vec::from)
}

fn optional_tech_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Option::<RawTech>::deserialize(deserializer).map(|raw| raw.map(Vec::from))
}
