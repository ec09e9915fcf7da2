use serde::Serialize;
use tracing::error;

use super::{AdminContent, ProjectFilter};
use crate::errors::AppError;
use crate::models::skill::{group_by_category, SkillGroup};
use crate::models::{
    AiTool, AiToolData, Category, CategoryData, Experience, ExperienceData, Project, ProjectData,
    SkillData,
};

/// A project with its category resolved. `category` is `None` when the
/// project's `categoryId` dangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub category: Option<Category>,
}

/// Read-only façade for the public site. Never fails: store errors are logged
/// and replaced with empty results.
#[derive(Clone)]
pub struct PublicContent {
    content: AdminContent,
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, AppError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!("Error fetching {what}: {e}");
        Vec::new()
    })
}

impl PublicContent {
    pub fn new(content: AdminContent) -> Self {
        Self { content }
    }

    /// Landing-page projects: featured only, in display order.
    pub async fn featured_projects(&self) -> Vec<Project> {
        or_empty("projects", self.content.get_all::<ProjectData>().await)
            .into_iter()
            .filter(|p| p.data.featured)
            .collect()
    }

    /// Projects listing page: every project, narrowed by `filter`.
    pub async fn all_projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        or_empty("projects", self.content.get_all::<ProjectData>().await)
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect()
    }

    /// Project detail page: the project and the category list are fetched
    /// concurrently.
    pub async fn project_detail(&self, id: &str) -> Option<ProjectDetail> {
        let (project, categories) = tokio::join!(
            self.content.get_by_id::<ProjectData>(id),
            self.content.get_all::<CategoryData>(),
        );

        let project = match project {
            Ok(project) => project?,
            Err(e) => {
                error!("Error fetching project {id}: {e}");
                return None;
            }
        };
        let category = or_empty("categories", categories)
            .into_iter()
            .find(|c| c.id == project.data.category_id);

        Some(ProjectDetail { project, category })
    }

    pub async fn experience(&self) -> Vec<Experience> {
        or_empty("experience", self.content.get_all::<ExperienceData>().await)
    }

    pub async fn categories(&self) -> Vec<Category> {
        or_empty("categories", self.content.get_all::<CategoryData>().await)
    }

    pub async fn skills_by_category(&self) -> Vec<SkillGroup> {
        let (skills, categories) = tokio::join!(
            self.content.get_all::<SkillData>(),
            self.content.get_all::<CategoryData>(),
        );
        let skills = or_empty("skills", skills);
        let categories = or_empty("categories", categories);
        group_by_category(&categories, &skills)
    }

    pub async fn ai_tools(&self) -> Vec<AiTool> {
        or_empty("AI tools", self.content.get_all::<AiToolData>().await)
    }
}
