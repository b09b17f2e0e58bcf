use crate::api::extractors::{AdminUser, ApiJson, ApiPath};
use crate::error::{AppError, AppResult};
use crate::models::Amenity;
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

const DUPLICATE: &str = "An amenity with this name already exists";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAmenityRequest {
    #[garde(length(max = 100), custom(not_blank))]
    pub name: String,
    #[garde(length(max = 64))]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAmenityRequest {
    #[garde(length(max = 100), custom(not_blank_opt))]
    pub name: Option<String>,
    #[garde(length(max = 64))]
    pub icon: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_amenities_handler).post(create_amenity_handler))
        .route(
            "/{id}",
            get(get_amenity_handler)
                .put(update_amenity_handler)
                .delete(delete_amenity_handler),
        )
}

fn not_found() -> AppError {
    AppError::NotFound("Amenity not found".to_string())
}

pub async fn list_amenities_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Amenity>>> {
    Ok(Json(state.amenity_repo.list().await?))
}

pub async fn get_amenity_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Amenity>> {
    let amenity = state.amenity_repo.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(amenity))
}

#[tracing::instrument(skip_all)]
pub async fn create_amenity_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateAmenityRequest>,
) -> AppResult<(StatusCode, Json<Amenity>)> {
    request.validate()?;
    let amenity = state
        .amenity_repo
        .create(request.name.trim(), request.icon.as_deref())
        .await
        .map_err(|e| e.conflict_as(DUPLICATE))?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_amenity_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAmenityRequest>,
) -> AppResult<Json<Amenity>> {
    request.validate()?;
    let amenity = state
        .amenity_repo
        .update(id, request.name.as_deref().map(str::trim), request.icon.as_deref())
        .await
        .map_err(|e| e.conflict_as(DUPLICATE))?
        .ok_or_else(not_found)?;
    Ok(Json(amenity))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn delete_amenity_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if !state.amenity_repo.delete(id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
