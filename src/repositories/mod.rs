pub mod amenity_repository;
pub mod category_repository;
pub mod contact_repository;
pub mod favorite_repository;
pub mod feature_repository;
pub mod property_image_repository;
pub mod property_repository;
pub mod site_content_repository;
pub mod user_repository;

// Re-export all repositories for convenient access
pub use amenity_repository::AmenityRepository;
pub use category_repository::CategoryRepository;
pub use contact_repository::ContactRepository;
pub use favorite_repository::FavoriteRepository;
pub use feature_repository::FeatureRepository;
pub use property_image_repository::PropertyImageRepository;
pub use property_repository::PropertyRepository;
pub use site_content_repository::SiteContentRepository;
pub use user_repository::UserRepository;
