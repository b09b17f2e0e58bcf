use crate::api::extractors::{AdminUser, ApiJson, ApiPath};
use crate::error::AppResult;
use crate::models::User;
use crate::services::account_service::UpdateUserRequest;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_users_handler)).route(
        "/{id}",
        get(get_user_handler)
            .put(update_user_handler)
            .delete(delete_user_handler),
    )
}

pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.accounts.list().await?))
}

pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<User>> {
    Ok(Json(state.accounts.get(id).await?))
}

#[tracing::instrument(skip(state, _admin, request))]
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(state.accounts.update(id, request).await?))
}

#[tracing::instrument(skip(state, admin))]
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    state.accounts.delete(admin.sub, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
