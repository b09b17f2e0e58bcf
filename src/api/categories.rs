use crate::api::extractors::{AdminUser, ApiJson, ApiPath};
use crate::error::{AppError, AppResult};
use crate::models::{Category, CategoryWithCount};
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

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[garde(length(max = 100), custom(not_blank))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[garde(length(max = 100), custom(not_blank_opt))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_categories_handler).post(create_category_handler))
        .route(
            "/{id}",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

pub async fn list_categories_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CategoryWithCount>>> {
    Ok(Json(state.category_repo.list_with_counts().await?))
}

pub async fn get_category_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Category>> {
    let category = state.category_repo.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(category))
}

#[tracing::instrument(skip_all)]
pub async fn create_category_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    request.validate()?;
    let category = state
        .category_repo
        .create(request.name.trim(), request.description.as_deref())
        .await
        .map_err(|e| e.conflict_as("A category with this name already exists"))?;

    tracing::info!("Created category {} ({})", category.name, category.id);
    Ok((StatusCode::CREATED, Json(category)))
}

#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_category_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateCategoryRequest>,
) -> AppResult<Json<Category>> {
    request.validate()?;
    let category = state
        .category_repo
        .update(
            id,
            request.name.as_deref().map(str::trim),
            request.description.as_deref(),
        )
        .await
        .map_err(|e| e.conflict_as("A category with this name already exists"))?
        .ok_or_else(not_found)?;
    Ok(Json(category))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn delete_category_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if !state.category_repo.delete(id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
