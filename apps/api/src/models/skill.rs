use serde::{Deserialize, Serialize};

use super::{require_non_empty, Entity, Record};
use crate::errors::AppError;
use crate::store::Collection;

pub type Category = Record<CategoryData>;
pub type Skill = Record<SkillData>;

pub const MAX_SKILL_LEVEL: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<CategoryData> for CategoryPatch {
    fn from(data: CategoryData) -> Self {
        Self {
            name: Some(data.name),
            order: Some(data.order),
        }
    }
}

impl Entity for CategoryData {
    type Patch = CategoryPatch;

    const COLLECTION: Collection = Collection::Categories;

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("name", &self.name)
    }

    fn validate_patch(patch: &CategoryPatch) -> Result<(), AppError> {
        match &patch.name {
            Some(name) => require_non_empty("name", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillData {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Proficiency percentage, 0..=100.
    pub level: u8,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<SkillData> for SkillPatch {
    fn from(data: SkillData) -> Self {
        Self {
            name: Some(data.name),
            icon: Some(data.icon),
            level: Some(data.level),
            category_id: Some(data.category_id),
            order: Some(data.order),
        }
    }
}

fn check_level(level: u8) -> Result<(), AppError> {
    if level > MAX_SKILL_LEVEL {
        return Err(AppError::Validation(format!(
            "level must be between 0 and {MAX_SKILL_LEVEL}, got {level}"
        )));
    }
    Ok(())
}

impl Entity for SkillData {
    type Patch = SkillPatch;

    const COLLECTION: Collection = Collection::Skills;

    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("categoryId", &self.category_id)?;
        check_level(self.level)
    }

    fn validate_patch(patch: &SkillPatch) -> Result<(), AppError> {
        if let Some(name) = &patch.name {
            require_non_empty("name", name)?;
        }
        if let Some(category_id) = &patch.category_id {
            require_non_empty("categoryId", category_id)?;
        }
        if let Some(level) = patch.level {
            check_level(level)?;
        }
        Ok(())
    }
}

/// A category together with the skills filed under it, in skill order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub category: Category,
    pub skills: Vec<Skill>,
}

/// Groups skills under their categories, keeping category order. Skills whose
/// category no longer exists are left out.
pub fn group_by_category(categories: &[Category], skills: &[Skill]) -> Vec<SkillGroup> {
    categories
        .iter()
        .map(|category| SkillGroup {
            category: category.clone(),
            skills: skills
                .iter()
                .filter(|s| s.data.category_id == category.id)
                .cloned()
                .collect(),
        })
        .collect()
}
