//! Axum route handlers for the admin API.
//!
//! The CRUD handlers are generic over the entity type; `crud_routes::<E>()`
//! mounts the same five operations for every collection.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::AdminSession;
use crate::errors::AppError;
use crate::models::{Entity, Record};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /api/admin/login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    let session = state.admin_gate.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        token: session.token().to_string(),
    }))
}

/// POST /api/admin/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> StatusCode {
    state.admin_gate.logout(&session).await;
    StatusCode::NO_CONTENT
}

/// GET /api/admin/{collection}
pub async fn handle_list<E: Entity>(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record<E>>>, AppError> {
    Ok(Json(state.content.get_all::<E>().await?))
}

/// GET /api/admin/{collection}/:id
pub async fn handle_get<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<E>>, AppError> {
    state
        .content
        .get_by_id::<E>(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{}/{id} not found", E::COLLECTION)))
}

/// POST /api/admin/{collection}
pub async fn handle_create<E: Entity>(
    State(state): State<AppState>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(record) = payload?;
    let id = state.content.add(&record).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PATCH /api/admin/{collection}/:id
pub async fn handle_update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<E::Patch>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(patch) = payload?;
    state.content.update::<E>(&id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/{collection}/:id
pub async fn handle_delete<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.content.delete::<E>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn crud_routes<E: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_list::<E>).post(handle_create::<E>))
        .route(
            "/:id",
            get(handle_get::<E>)
                .patch(handle_update::<E>)
                .delete(handle_delete::<E>),
        )
}
