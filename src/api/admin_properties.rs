use crate::api::extractors::{AdminUser, ApiPath};
use crate::error::AppResult;
use crate::models::{PropertyDetail, PropertyImage};
use crate::services::{FormFields, PropertyForm};
use crate::AppState;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound on files in one form; the request body limit scales with it
const MAX_FILES_PER_REQUEST: usize = 10;

pub fn router(state: &AppState) -> Router<Arc<AppState>> {
    let body_limit = state
        .uploads
        .max_bytes()
        .saturating_mul(MAX_FILES_PER_REQUEST);

    Router::new()
        .route("/", post(create_property_handler))
        .route(
            "/{id}",
            put(update_property_handler).delete(delete_property_handler),
        )
        .route("/{id}/images", post(add_images_handler))
        .route("/{id}/images/{image_id}", delete(remove_image_handler))
        .layer(DefaultBodyLimit::max(body_limit))
}

#[tracing::instrument(skip_all)]
pub async fn create_property_handler(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    fields: FormFields,
) -> AppResult<(StatusCode, Json<PropertyDetail>)> {
    let form = PropertyForm::from_fields(fields)?;
    let detail = state.properties.create(form, Some(admin.sub)).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[tracing::instrument(skip(state, _admin, fields))]
pub async fn update_property_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    fields: FormFields,
) -> AppResult<Json<PropertyDetail>> {
    let form = PropertyForm::from_fields(fields)?;
    Ok(Json(state.properties.update(id, form).await?))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn delete_property_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    state.properties.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state, _admin, fields))]
pub async fn add_images_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    fields: FormFields,
) -> AppResult<(StatusCode, Json<Vec<PropertyImage>>)> {
    let caption = fields
        .text
        .get("caption")
        .and_then(|values| values.first())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let images = state
        .properties
        .add_images(id, &fields.files, caption.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(images)))
}

#[tracing::instrument(skip(state, _admin))]
pub async fn remove_image_handler(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    ApiPath((id, image_id)): ApiPath<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state.properties.remove_image(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
