use crate::uploads::PUBLIC_PREFIX;
use crate::AppState;
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

mod admin_properties;
mod amenities;
mod auth;
mod categories;
mod contacts;
mod content;
pub mod extractors;
mod favorites;
mod features;
mod health;
pub mod multipart;
mod properties;
mod users;

/// Build the full HTTP application: `/api` routes plus static uploads
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state);
    let uploads = ServeDir::new(state.uploads.root());

    let api = Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/properties", properties::router())
        .nest("/admin/properties", admin_properties::router(&state))
        .nest("/categories", categories::router())
        .nest("/amenities", amenities::router())
        .nest("/features", features::router())
        .nest("/users", users::router())
        .nest("/contacts", contacts::router())
        .nest("/favorites", favorites::router())
        .nest("/content", content::router());

    Router::new()
        .nest("/api", api)
        .nest_service(PUBLIC_PREFIX, uploads)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let config = &state.config;
    if config.cors_origins.is_empty() {
        if config.is_development() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }
        // Same-origin only
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
