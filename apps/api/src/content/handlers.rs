//! Axum route handlers for the public site.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::filter::{CategoryFilter, ProjectFilter};
use super::presentation::{unlock_presentation, PublicProject};
use crate::errors::AppError;
use crate::models::skill::SkillGroup;
use crate::models::{AiTool, Category, Experience};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    /// `all` lists every project (listing page); anything else lists featured.
    pub scope: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub project: PublicProject,
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub passkey: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    pub presentation_url: String,
}

/// GET /api/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsQuery>,
) -> Json<Vec<PublicProject>> {
    let projects = if params.scope.as_deref() == Some("all") {
        let filter = ProjectFilter {
            search_term: params.search.unwrap_or_default(),
            category: CategoryFilter::parse(params.category.as_deref()),
        };
        state.public.all_projects(&filter).await
    } else {
        state.public.featured_projects().await
    };

    Json(projects.into_iter().map(PublicProject::from).collect())
}

/// GET /api/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    let detail = state
        .public
        .project_detail(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    Ok(Json(ProjectDetailResponse {
        project: detail.project.into(),
        category: detail.category,
    }))
}

/// POST /api/projects/:id/presentation
pub async fn handle_unlock_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>, AppError> {
    let detail = state
        .public
        .project_detail(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let presentation_url = unlock_presentation(&detail.project, &req.passkey)?;
    Ok(Json(UnlockResponse { presentation_url }))
}

/// GET /api/experience
pub async fn handle_list_experience(State(state): State<AppState>) -> Json<Vec<Experience>> {
    Json(state.public.experience().await)
}

/// GET /api/categories
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.public.categories().await)
}

/// GET /api/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<Vec<SkillGroup>> {
    Json(state.public.skills_by_category().await)
}

/// GET /api/aitools
pub async fn handle_list_ai_tools(State(state): State<AppState>) -> Json<Vec<AiTool>> {
    Json(state.public.ai_tools().await)
}
