use crate::api::extractors::{AdminUser, ApiJson, ApiPath, ApiQuery};
use crate::error::{AppError, AppResult};
use crate::models::{Contact, ContactStatus};
use crate::services::contact_service::{ContactRequest, ContactStatusUpdate};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ContactFilter {
    pub status: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_contacts_handler).post(submit_contact_handler))
        .route("/{id}/status", put(update_contact_status_handler))
        .route("/{id}", delete(delete_contact_handler))
}

#[tracing::instrument(skip_all)]
pub async fn submit_contact_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let contact = state.contacts.submit(request).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn list_contacts_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiQuery(filter): ApiQuery<ContactFilter>,
) -> AppResult<Json<Vec<Contact>>> {
    let status = filter
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ContactStatus::from_str(s).map_err(AppError::Validation))
        .transpose()?;

    Ok(Json(state.contacts.list(status).await?))
}

#[tracing::instrument(skip(state, _admin, update))]
pub async fn update_contact_status_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<ContactStatusUpdate>,
) -> AppResult<Json<Contact>> {
    Ok(Json(state.contacts.update_status(id, update.status).await?))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn delete_contact_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    state.contacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
