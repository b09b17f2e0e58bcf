//! Domain models for the Estate backend.
//!
//! Database-backed records for the property catalog, the people using
//! the site, and the editable content shown on marketing pages.

pub mod amenity;
pub mod category;
pub mod contact;
pub mod favorite;
pub mod feature;
pub mod property;
pub mod property_image;
pub mod site_content;
pub mod user;

// Re-export all models for convenient access
pub use amenity::Amenity;
pub use category::{Category, CategoryWithCount};
pub use contact::{Contact, ContactStatus};
pub use favorite::Favorite;
pub use feature::Feature;
pub use property::{
    ListingStatus, NewProperty, Property, PropertyChanges, PropertyDetail, PropertyType,
};
pub use property_image::PropertyImage;
pub use site_content::SiteContent;
pub use user::{User, UserRole};
