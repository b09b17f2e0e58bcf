//! Estate Backend Library
//!
//! This module exposes the backend components for use by tests and the binaries.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod deployment;
pub mod error;
pub mod listing;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod uploads;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use auth::JwtKeys;
use database::Database;
use repositories::*;
use services::{AccountService, ContactService, PropertyService};
use std::sync::Arc;
use uploads::UploadStore;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub config: AppConfig,
    pub jwt: JwtKeys,
    pub uploads: UploadStore,
    pub user_repo: Arc<UserRepository>,
    pub property_repo: Arc<PropertyRepository>,
    pub image_repo: Arc<PropertyImageRepository>,
    pub category_repo: Arc<CategoryRepository>,
    pub amenity_repo: Arc<AmenityRepository>,
    pub feature_repo: Arc<FeatureRepository>,
    pub contact_repo: Arc<ContactRepository>,
    pub favorite_repo: Arc<FavoriteRepository>,
    pub content_repo: Arc<SiteContentRepository>,
    pub properties: PropertyService,
    pub accounts: AccountService,
    pub contacts: ContactService,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::PgPool, config: AppConfig) -> Self {
        let database = Database::new(pool.clone());
        let jwt = JwtKeys::new(&config.auth);
        let uploads = UploadStore::new(&config.uploads);

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let property_repo = Arc::new(PropertyRepository::new(pool.clone()));
        let image_repo = Arc::new(PropertyImageRepository::new(pool.clone()));
        let category_repo = Arc::new(CategoryRepository::new(pool.clone()));
        let amenity_repo = Arc::new(AmenityRepository::new(pool.clone()));
        let feature_repo = Arc::new(FeatureRepository::new(pool.clone()));
        let contact_repo = Arc::new(ContactRepository::new(pool.clone()));
        let favorite_repo = Arc::new(FavoriteRepository::new(pool.clone()));
        let content_repo = Arc::new(SiteContentRepository::new(pool));

        let properties = PropertyService::new(
            property_repo.clone(),
            image_repo.clone(),
            category_repo.clone(),
            amenity_repo.clone(),
            feature_repo.clone(),
            uploads.clone(),
        );
        let accounts = AccountService::new(user_repo.clone(), jwt.clone());
        let contacts = ContactService::new(contact_repo.clone(), property_repo.clone());

        Self {
            database,
            config,
            jwt,
            uploads,
            user_repo,
            property_repo,
            image_repo,
            category_repo,
            amenity_repo,
            feature_repo,
            contact_repo,
            favorite_repo,
            content_repo,
            properties,
            accounts,
            contacts,
        }
    }
}
