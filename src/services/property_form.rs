use crate::error::{AppError, AppResult};
use crate::models::{ListingStatus, NewProperty, PropertyChanges, PropertyType};
use crate::uploads::UploadedFile;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Raw fields of a multipart admin form
#[derive(Debug, Default)]
pub struct FormFields {
    pub text: HashMap<String, Vec<String>>,
    pub files: Vec<UploadedFile>,
}

impl FormFields {
    /// Record a text value; `name[]` is folded into `name`
    pub fn push_text(&mut self, name: &str, value: String) {
        let key = name.trim_end_matches("[]").to_string();
        self.text.entry(key).or_default().push(value);
    }

    /// First non-blank value for a field, trimmed
    fn first(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .and_then(|values| values.iter().map(|v| v.trim()).find(|v| !v.is_empty()))
    }

    fn text(&self, name: &str) -> Option<String> {
        self.first(name).map(str::to_string)
    }

    fn parse<T>(&self, name: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
    {
        self.first(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    AppError::Validation(format!("Field '{}' has an invalid value: {}", name, raw))
                })
            })
            .transpose()
    }

    /// Every id sent under `name`. `None` when the field is absent; an
    /// empty list when it was sent blank (clears the set).
    fn ids(&self, name: &str) -> AppResult<Option<Vec<Uuid>>> {
        let Some(values) = self.text.get(name) else {
            return Ok(None);
        };

        let mut ids = Vec::new();
        for raw in values.iter().flat_map(|v| v.split(',')).map(str::trim) {
            if raw.is_empty() {
                continue;
            }
            let id = Uuid::parse_str(raw).map_err(|_| {
                AppError::Validation(format!("Field '{}' has an invalid id: {}", name, raw))
            })?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(Some(ids))
    }
}

/// Admin property form after parsing
#[derive(Debug, Default)]
pub struct PropertyForm {
    pub changes: PropertyChanges,
    pub amenity_ids: Option<Vec<Uuid>>,
    pub feature_ids: Option<Vec<Uuid>>,
    pub images: Vec<UploadedFile>,
}

fn parse_price(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '$').collect();
    let price = Decimal::from_str(cleaned.trim()).map_err(|_| raw.to_string())?;
    if price.is_sign_negative() {
        return Err(raw.to_string());
    }
    Ok(price)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn non_negative(name: &str, value: Option<i32>) -> AppResult<Option<i32>> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!(
            "Field '{}' must not be negative",
            name
        ))),
        other => Ok(other),
    }
}

impl PropertyForm {
    pub fn from_fields(fields: FormFields) -> AppResult<Self> {
        let price = fields
            .first("price")
            .map(|raw| {
                parse_price(raw).map_err(|raw| {
                    AppError::Validation(format!("Field 'price' has an invalid value: {}", raw))
                })
            })
            .transpose()?;

        let property_type = fields
            .first("property_type")
            .map(|raw| PropertyType::from_str(raw).map_err(AppError::Validation))
            .transpose()?;

        let status = fields
            .first("status")
            .map(|raw| ListingStatus::from_str(raw).map_err(AppError::Validation))
            .transpose()?;

        let featured = fields
            .first("featured")
            .map(|raw| {
                parse_flag(raw).ok_or_else(|| {
                    AppError::Validation(format!("Field 'featured' has an invalid value: {}", raw))
                })
            })
            .transpose()?;

        let changes = PropertyChanges {
            title: fields.text("title"),
            description: fields.text("description"),
            property_type,
            status,
            price,
            address: fields.text("address"),
            city: fields.text("city"),
            state: fields.text("state"),
            zip_code: fields.text("zip_code"),
            bedrooms: non_negative("bedrooms", fields.parse::<i32>("bedrooms")?)?,
            bathrooms: non_negative("bathrooms", fields.parse::<i32>("bathrooms")?)?,
            size_sqft: non_negative("size_sqft", fields.parse::<i32>("size_sqft")?)?,
            year_built: fields.parse::<i32>("year_built")?,
            category_id: fields.parse::<Uuid>("category_id")?,
            featured,
            image_url: fields.text("image_url"),
        };

        Ok(Self {
            changes,
            amenity_ids: fields.ids("amenity_ids")?,
            feature_ids: fields.ids("feature_ids")?,
            images: fields.files,
        })
    }

    /// Build an insert, enforcing the fields a new listing must have
    pub fn to_new_property(&self, owner_id: Option<Uuid>) -> AppResult<NewProperty> {
        NewProperty::from_changes(&self.changes, owner_id).map_err(AppError::Validation)
    }
}
