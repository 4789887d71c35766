use crate::{
    errors::AppError,
    models::{Idea, NewIdea},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_ideas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Idea>>, AppError> {
    tracing::debug!("Listing all ideas via handler");
    let ideas = state.idea_repo.list_all().await?;
    tracing::info!("Handler successfully retrieved {} ideas", ideas.len());
    Ok(Json(ideas))
}

pub async fn create_idea(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewIdea>,
) -> Result<impl IntoResponse, AppError> {
    let valid = payload.validate()?;
    let idea = state.idea_repo.create(&valid).await?;

    tracing::info!(idea_id = %idea.id, "Idea created successfully via handler");
    Ok((StatusCode::CREATED, Json(idea)))
}

pub async fn like_idea(
    State(state): State<Arc<AppState>>,
    Path(idea_id): Path<i64>,
) -> Result<Json<Idea>, AppError> {
    let idea = state.idea_repo.increment_like(idea_id).await?;
    tracing::info!(%idea_id, likes = idea.likes, "Idea liked via handler");
    Ok(Json(idea))
}

/// Returns 204 with no body once the idea is gone.
pub async fn delete_idea(
    State(state): State<Arc<AppState>>,
    Path(idea_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.idea_repo.delete_by_id(idea_id).await?;
    tracing::info!(%idea_id, "Idea deleted successfully via handler");
    Ok(StatusCode::NO_CONTENT)
}
