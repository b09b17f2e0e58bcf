use crate::models::{ListingStatus, Property, PropertyType};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: u32 = 9;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Error types for listing queries
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListingError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),

    #[error("Invalid sort order: {0}")]
    InvalidSort(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

/// Result type for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    SizeAsc,
    SizeDesc,
    BedroomsAsc,
    BedroomsDesc,
}

impl FromStr for SortOrder {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "size-asc" => Ok(SortOrder::SizeAsc),
            "size-desc" => Ok(SortOrder::SizeDesc),
            "bedrooms-asc" => Ok(SortOrder::BedroomsAsc),
            "bedrooms-desc" => Ok(SortOrder::BedroomsDesc),
            _ => Err(ListingError::InvalidSort(s.to_string())),
        }
    }
}

impl SortOrder {
    fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::Oldest => a.created_at.cmp(&b.created_at),
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::SizeAsc => a.size_sqft.cmp(&b.size_sqft),
            SortOrder::SizeDesc => b.size_sqft.cmp(&a.size_sqft),
            SortOrder::BedroomsAsc => a.bedrooms.cmp(&b.bedrooms),
            SortOrder::BedroomsDesc => b.bedrooms.cmp(&a.bedrooms),
        }
    }
}

/// Query-string shape of a catalog search. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_bathrooms: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<u32>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Validated, typed catalog search
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub city: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub featured: Option<bool>,
    pub sort: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            category_id: None,
            property_type: None,
            status: None,
            city: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            min_bathrooms: None,
            featured: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingParams {
    /// Parse the enumerated fields and apply defaults
    pub fn into_query(self) -> ListingResult<ListingQuery> {
        let property_type = self
            .property_type
            .map(|s| PropertyType::from_str(&s).map_err(ListingError::InvalidFilter))
            .transpose()?;
        let status = self
            .status
            .map(|s| ListingStatus::from_str(&s).map_err(ListingError::InvalidFilter))
            .transpose()?;
        let sort = self
            .sort
            .map(|s| s.parse::<SortOrder>())
            .transpose()?
            .unwrap_or_default();

        let query = ListingQuery {
            search: self.search,
            category_id: self.category_id,
            property_type,
            status,
            city: self.city,
            min_price: self.min_price,
            max_price: self.max_price,
            min_bedrooms: self.min_bedrooms,
            min_bathrooms: self.min_bathrooms,
            featured: self.featured,
            sort,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        };
        query.validate()?;
        Ok(query)
    }
}

impl ListingQuery {
    pub fn validate(&self) -> ListingResult<()> {
        if self.page == 0 {
            return Err(ListingError::InvalidPage("page starts at 1".to_string()));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ListingError::InvalidPageSize(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ListingError::InvalidPriceRange(format!(
                    "min_price {} is greater than max_price {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// True when the property satisfies every supplied criterion
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_bedrooms {
            if property.bedrooms < min {
                return false;
            }
        }
        if let Some(min) = self.min_bathrooms {
            if property.bathrooms < min {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if property.category_id != Some(category_id) {
                return false;
            }
        }
        if let Some(property_type) = self.property_type {
            if property.property_type_enum() != property_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if property.status_enum() != status {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if property.featured != featured {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if property.city.to_lowercase() != city.trim().to_lowercase() {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !property.matches_text(&needle) {
                return false;
            }
        }
        true
    }
}

/// One window of results plus the totals a pager needs
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

pub fn filter(properties: Vec<Property>, query: &ListingQuery) -> Vec<Property> {
    properties.into_iter().filter(|p| query.matches(p)).collect()
}

/// Stable sort; equal keys keep their input order
pub fn sort(properties: &mut [Property], order: SortOrder) {
    properties.sort_by(|a, b| order.compare(a, b));
}

/// Cut the `[(page-1)*page_size, page*page_size)` window.
///
/// A page past the end yields no items but still reports the totals.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> ListingPage<T> {
    let total_items = items.len();
    let size = page_size.max(1) as usize;
    let total_pages = total_items.div_ceil(size) as u32;
    let start = (page.max(1) as usize - 1).saturating_mul(size);

    let items = items.into_iter().skip(start).take(size).collect();

    ListingPage {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// validate → filter → sort → paginate
pub fn run(properties: Vec<Property>, query: &ListingQuery) -> ListingResult<ListingPage<Property>> {
    query.validate()?;
    let mut matched = filter(properties, query);
    sort(&mut matched, query.sort);
    Ok(paginate(matched, query.page, query.page_size))
}
