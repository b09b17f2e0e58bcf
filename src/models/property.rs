use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Amenity, Category, Feature, PropertyImage};

/// Kind of listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Condo,
    SingleFamily,
    Townhouse,
    Land,
    Neighborhood,
}

impl PropertyType {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "condo" => Ok(PropertyType::Condo),
            "single_family" => Ok(PropertyType::SingleFamily),
            "townhouse" => Ok(PropertyType::Townhouse),
            "land" => Ok(PropertyType::Land),
            "neighborhood" => Ok(PropertyType::Neighborhood),
            _ => Err(format!("Invalid property type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Condo => "condo",
            PropertyType::SingleFamily => "single_family",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Land => "land",
            PropertyType::Neighborhood => "neighborhood",
        }
    }
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(PropertyType::SingleFamily)
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
    Pending,
    Sold,
}

impl ListingStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "for_sale" => Ok(ListingStatus::ForSale),
            "for_rent" => Ok(ListingStatus::ForRent),
            "pending" => Ok(ListingStatus::Pending),
            "sold" => Ok(ListingStatus::Sold),
            _ => Err(format!("Invalid listing status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for_sale",
            ListingStatus::ForRent => "for_rent",
            ListingStatus::Pending => "pending",
            ListingStatus::Sold => "sold",
        }
    }
}

impl From<String> for ListingStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(ListingStatus::ForSale)
    }
}

/// Property listing
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: String, // Stored as TEXT, use PropertyType enum for type safety
    pub status: String,        // Stored as TEXT, use ListingStatus enum for type safety
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub size_sqft: i32,
    pub year_built: Option<i32>,
    pub category_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub featured: bool,
    pub image_url: Option<String>, // Cover image; gallery lives in property_images
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Property {
    /// Get property type as an enum
    pub fn property_type_enum(&self) -> PropertyType {
        PropertyType::from_str(&self.property_type).unwrap_or(PropertyType::SingleFamily)
    }

    /// Get listing status as an enum
    pub fn status_enum(&self) -> ListingStatus {
        ListingStatus::from_str(&self.status).unwrap_or(ListingStatus::ForSale)
    }

    /// Case-insensitive substring match over the searchable text fields
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        [&self.title, &self.description, &self.address, &self.city]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Fields for inserting a property
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub size_sqft: i32,
    pub year_built: Option<i32>,
    pub category_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub featured: bool,
    pub image_url: Option<String>,
}

impl NewProperty {
    /// Complete a change set into an insert. Title, price, address and city
    /// must be present; the rest fall back to listing defaults.
    pub fn from_changes(changes: &PropertyChanges, owner_id: Option<Uuid>) -> Result<Self, String> {
        fn required<T: Clone>(value: &Option<T>, name: &str) -> Result<T, String> {
            value
                .clone()
                .ok_or_else(|| format!("Field '{}' is required", name))
        }

        Ok(Self {
            title: required(&changes.title, "title")?,
            description: changes.description.clone().unwrap_or_default(),
            property_type: changes.property_type.unwrap_or(PropertyType::SingleFamily),
            status: changes.status.unwrap_or(ListingStatus::ForSale),
            price: required(&changes.price, "price")?,
            address: required(&changes.address, "address")?,
            city: required(&changes.city, "city")?,
            state: changes.state.clone().unwrap_or_default(),
            zip_code: changes.zip_code.clone().unwrap_or_default(),
            bedrooms: changes.bedrooms.unwrap_or(0),
            bathrooms: changes.bathrooms.unwrap_or(0),
            size_sqft: changes.size_sqft.unwrap_or(0),
            year_built: changes.year_built,
            category_id: changes.category_id,
            owner_id,
            featured: changes.featured.unwrap_or(false),
            image_url: changes.image_url.clone(),
        })
    }
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub price: Option<Decimal>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub size_sqft: Option<i32>,
    pub year_built: Option<i32>,
    pub category_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

/// Everything the listing detail page shows
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    pub category: Option<Category>,
    pub images: Vec<PropertyImage>,
    pub amenities: Vec<Amenity>,
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_parsing() {
        assert_eq!(PropertyType::from_str("condo").unwrap(), PropertyType::Condo);
        assert_eq!(
            PropertyType::from_str("single-family").unwrap(),
            PropertyType::SingleFamily
        );
        assert_eq!(
            PropertyType::from_str("Single_Family").unwrap(),
            PropertyType::SingleFamily
        );
        assert!(PropertyType::from_str("castle").is_err());
    }

    #[test]
    fn test_listing_status_parsing() {
        assert_eq!(ListingStatus::from_str("for-rent").unwrap(), ListingStatus::ForRent);
        assert_eq!(ListingStatus::from("bogus".to_string()), ListingStatus::ForSale);
        assert_eq!(ListingStatus::Sold.as_str(), "sold");
    }
}
