use crate::api::extractors::{ApiPath, ApiQuery};
use crate::error::AppResult;
use crate::listing::{ListingPage, ListingParams};
use crate::models::{Property, PropertyDetail};
use crate::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_properties_handler))
        .route("/featured", get(featured_properties_handler))
        .route("/{id}", get(get_property_handler))
}

#[tracing::instrument(skip_all)]
pub async fn list_properties_handler(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> AppResult<Json<ListingPage<Property>>> {
    let query = params.into_query()?;
    Ok(Json(state.properties.search(&query).await?))
}

pub async fn featured_properties_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(state.properties.featured().await?))
}

#[tracing::instrument(skip(state))]
pub async fn get_property_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<PropertyDetail>> {
    Ok(Json(state.properties.detail(id).await?))
}
