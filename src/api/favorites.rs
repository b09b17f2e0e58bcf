use crate::api::extractors::{ApiPath, AuthUser};
use crate::error::{AppError, AppResult};
use crate::models::{Favorite, Property};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_favorites_handler))
        .route(
            "/{property_id}",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
}

pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(state.favorite_repo.properties_for_user(user.sub).await?))
}

/// 201 when the favorite is new, 200 when it already existed
#[tracing::instrument(skip(state, user))]
pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiPath(property_id): ApiPath<Uuid>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    if state.property_repo.find_by_id(property_id).await?.is_none() {
        return Err(AppError::NotFound("Property not found".to_string()));
    }

    let (favorite, created) = state.favorite_repo.add(user.sub, property_id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(favorite)))
}

#[tracing::instrument(skip(state, user))]
pub async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    ApiPath(property_id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    if !state.favorite_repo.remove(user.sub, property_id).await? {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
