use crate::api::extractors::{AdminUser, ApiJson, ApiPath};
use crate::error::{AppError, AppResult};
use crate::models::SiteContent;
use crate::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub body: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_content_handler))
        .route("/{key}", get(get_content_handler).put(put_content_handler))
}

fn check_key(key: &str) -> AppResult<()> {
    if !SiteContent::is_valid_key(key) {
        return Err(AppError::Validation(format!(
            "Invalid content key '{}': use lowercase letters, digits and '-'",
            key
        )));
    }
    Ok(())
}

pub async fn list_content_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<SiteContent>>> {
    Ok(Json(state.content_repo.list().await?))
}

pub async fn get_content_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(key): ApiPath<String>,
) -> AppResult<Json<SiteContent>> {
    check_key(&key)?;
    let block = state
        .content_repo
        .find(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No content block '{}'", key)))?;
    Ok(Json(block))
}

#[tracing::instrument(skip(state, _admin, update))]
pub async fn put_content_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(key): ApiPath<String>,
    ApiJson(update): ApiJson<ContentUpdate>,
) -> AppResult<Json<SiteContent>> {
    check_key(&key)?;
    let block = state
        .content_repo
        .upsert(&key, update.title.as_deref(), &update.body)
        .await?;

    tracing::info!("Updated content block {}", block.key);
    Ok(Json(block))
}
