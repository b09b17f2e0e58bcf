#![allow(dead_code)]

use chrono::NaiveDate;
use estate_backend::models::*;
use estate_backend::repositories::*;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repositories over one test pool
pub struct TestDatabase {
    pub pool: PgPool,
    pub user_repo: Arc<UserRepository>,
    pub property_repo: Arc<PropertyRepository>,
    pub image_repo: Arc<PropertyImageRepository>,
    pub category_repo: Arc<CategoryRepository>,
    pub amenity_repo: Arc<AmenityRepository>,
    pub feature_repo: Arc<FeatureRepository>,
    pub contact_repo: Arc<ContactRepository>,
    pub favorite_repo: Arc<FavoriteRepository>,
    pub content_repo: Arc<SiteContentRepository>,
}

impl TestDatabase {
    /// Create TestDatabase from an existing pool (useful with sqlx::test)
    pub async fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            property_repo: Arc::new(PropertyRepository::new(pool.clone())),
            image_repo: Arc::new(PropertyImageRepository::new(pool.clone())),
            category_repo: Arc::new(CategoryRepository::new(pool.clone())),
            amenity_repo: Arc::new(AmenityRepository::new(pool.clone())),
            feature_repo: Arc::new(FeatureRepository::new(pool.clone())),
            contact_repo: Arc::new(ContactRepository::new(pool.clone())),
            favorite_repo: Arc::new(FavoriteRepository::new(pool.clone())),
            content_repo: Arc::new(SiteContentRepository::new(pool)),
        }
    }

    /// Clean up all test data
    pub async fn cleanup(&self) {
        sqlx::query(
            "TRUNCATE TABLE favorites, contacts, property_images, property_amenities, \
             property_features, properties, amenities, features, categories, users, \
             site_content RESTART IDENTITY CASCADE",
        )
        .execute(&self.pool)
        .await
        .expect("Failed to cleanup test data");
    }

    /// Insert a listing with sensible defaults
    pub async fn create_property(&self, title: &str, price: i64, bedrooms: i32) -> Property {
        self.property_repo
            .create(&new_property(title, price, bedrooms))
            .await
            .expect("Failed to create property")
    }

    pub async fn create_user(&self, email: &str, role: UserRole) -> User {
        self.user_repo
            .create(email, "Test User", "not-a-real-hash", role, None)
            .await
            .expect("Failed to create user")
    }
}

/// Insert payload for a listing in Austin
pub fn new_property(title: &str, price: i64, bedrooms: i32) -> NewProperty {
    NewProperty {
        title: title.to_string(),
        description: format!("{} description", title),
        property_type: PropertyType::SingleFamily,
        status: ListingStatus::ForSale,
        price: Decimal::new(price, 0),
        address: "1 Main St".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip_code: "78701".to_string(),
        bedrooms,
        bathrooms: 1,
        size_sqft: 1_000 + bedrooms * 250,
        year_built: Some(2000),
        category_id: None,
        owner_id: None,
        featured: false,
        image_url: None,
    }
}

/// In-memory property for pipeline tests; `day` orders `created_at`
pub fn sample_property(title: &str, price: i64, bedrooms: i32, day: u32) -> Property {
    let created_at = NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date");

    Property {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        property_type: PropertyType::SingleFamily.as_str().to_string(),
        status: ListingStatus::ForSale.as_str().to_string(),
        price: Decimal::new(price, 0),
        address: "1 Main St".to_string(),
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip_code: "78701".to_string(),
        bedrooms,
        bathrooms: 1,
        size_sqft: 1_000,
        year_built: None,
        category_id: None,
        owner_id: None,
        featured: false,
        image_url: None,
        created_at,
        updated_at: created_at,
    }
}
