use crate::api::extractors::{AdminUser, ApiJson, ApiPath};
use crate::error::{AppError, AppResult};
use crate::models::Feature;
use crate::services::validation::{not_blank, not_blank_opt};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use garde::Validate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

const DUPLICATE: &str = "A feature with this name already exists";

#[derive(Debug, Deserialize, Validate)]
pub struct FeatureRequest {
    #[garde(length(max = 100), custom(not_blank))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFeatureRequest {
    #[garde(length(max = 100), custom(not_blank_opt))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_features_handler).post(create_feature_handler))
        .route(
            "/{id}",
            get(get_feature_handler)
                .put(update_feature_handler)
                .delete(delete_feature_handler),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Feature not found".to_string())
}

pub async fn list_features_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Feature>>> {
    Ok(Json(state.feature_repo.list().await?))
}

pub async fn get_feature_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Feature>> {
    let feature = state.feature_repo.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(feature))
}

#[tracing::instrument(skip_all)]
pub async fn create_feature_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<FeatureRequest>,
) -> AppResult<(StatusCode, Json<Feature>)> {
    request.validate()?;
    let feature = state
        .feature_repo
        .create(request.name.trim(), request.description.as_deref())
        .await
        .map_err(|e| e.conflict_as(DUPLICATE))?;
    Ok((StatusCode::CREATED, Json(feature)))
}

#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_feature_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateFeatureRequest>,
) -> AppResult<Json<Feature>> {
    request.validate()?;
    let feature = state
        .feature_repo
        .update(
            id,
            request.name.as_deref().map(str::trim),
            request.description.as_deref(),
        )
        .await
        .map_err(|e| e.conflict_as(DUPLICATE))?
        .ok_or_else(not_found)?;
    Ok(Json(feature))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn delete_feature_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if !state.feature_repo.delete(id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
