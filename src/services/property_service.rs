use crate::error::{AppError, AppResult};
use crate::listing::{self, ListingPage, ListingQuery};
use crate::models::{Property, PropertyDetail, PropertyImage};
use crate::repositories::{
    AmenityRepository, CategoryRepository, FeatureRepository, PropertyImageRepository,
    PropertyRepository,
};
use crate::services::property_form::PropertyForm;
use crate::uploads::{UploadStore, UploadedFile};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const FEATURED_LIMIT: i64 = 6;

/// Catalog reads and back-office property management
pub struct PropertyService {
    property_repo: Arc<PropertyRepository>,
    image_repo: Arc<PropertyImageRepository>,
    category_repo: Arc<CategoryRepository>,
    amenity_repo: Arc<AmenityRepository>,
    feature_repo: Arc<FeatureRepository>,
    uploads: UploadStore,
}

impl PropertyService {
    pub fn new(
        property_repo: Arc<PropertyRepository>,
        image_repo: Arc<PropertyImageRepository>,
        category_repo: Arc<CategoryRepository>,
        amenity_repo: Arc<AmenityRepository>,
        feature_repo: Arc<FeatureRepository>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            property_repo,
            image_repo,
            category_repo,
            amenity_repo,
            feature_repo,
            uploads,
        }
    }

    /// Run the listing pipeline over the whole catalog
    pub async fn search(&self, query: &ListingQuery) -> AppResult<ListingPage<Property>> {
        query.validate()?;
        let properties = self.property_repo.list_all().await?;
        let page = listing::run(properties, query)?;

        info!(
            "Catalog search matched {} properties (page {}/{})",
            page.total_items, page.page, page.total_pages
        );
        Ok(page)
    }

    pub async fn featured(&self) -> AppResult<Vec<Property>> {
        Ok(self.property_repo.list_featured(FEATURED_LIMIT).await?)
    }

    /// Property with category, gallery, amenities and features
    pub async fn detail(&self, id: Uuid) -> AppResult<PropertyDetail> {
        let property = self.find(id).await?;

        let category = match property.category_id {
            Some(category_id) => self.category_repo.find_by_id(category_id).await?,
            None => None,
        };
        let images = self.image_repo.find_by_property(id).await?;
        let amenities = self.property_repo.amenities_for(id).await?;
        let features = self.property_repo.features_for(id).await?;

        Ok(PropertyDetail {
            property,
            category,
            images,
            amenities,
            features,
        })
    }

    /// Create a listing from the admin form, storing any uploaded images
    pub async fn create(&self, form: PropertyForm, owner_id: Option<Uuid>) -> AppResult<PropertyDetail> {
        let mut new = form.to_new_property(owner_id)?;
        self.check_references(&form).await?;

        let urls = self.store_images(&form.images).await?;
        if new.image_url.is_none() {
            new.image_url = urls.first().cloned();
        }

        let property = self.property_repo.create(&new).await?;
        self.apply_relations(property.id, &form).await?;
        for url in &urls {
            self.image_repo.append(property.id, url, None).await?;
        }

        info!("Created property {} ({})", property.title, property.id);
        self.detail(property.id).await
    }

    /// Partial update; supplied id lists replace the join sets, new images append
    pub async fn update(&self, id: Uuid, form: PropertyForm) -> AppResult<PropertyDetail> {
        let existing = self.find(id).await?;
        self.check_references(&form).await?;

        let urls = self.store_images(&form.images).await?;
        let mut changes = form.changes.clone();
        if changes.image_url.is_none() && existing.image_url.is_none() {
            changes.image_url = urls.first().cloned();
        }

        self.property_repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".into()))?;
        self.apply_relations(id, &form).await?;
        for url in &urls {
            if !self.image_repo.exists(id, url).await? {
                self.image_repo.append(id, url, None).await?;
            }
        }

        info!("Updated property {}", id);
        self.detail(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let images = self.image_repo.find_by_property(id).await?;
        if !self.property_repo.delete(id).await? {
            return Err(AppError::NotFound("Property not found".into()));
        }

        for image in images {
            if let Err(e) = self.uploads.remove_by_url(&image.url).await {
                warn!("Could not remove image file {}: {}", image.url, e);
            }
        }

        info!("Deleted property {}", id);
        Ok(())
    }

    /// Append uploaded files to a property's gallery
    pub async fn add_images(
        &self,
        id: Uuid,
        files: &[UploadedFile],
        caption: Option<&str>,
    ) -> AppResult<Vec<PropertyImage>> {
        let property = self.find(id).await?;
        if files.is_empty() {
            return Err(AppError::Validation("No image files were uploaded".into()));
        }

        let urls = self.store_images(files).await?;
        let mut images = Vec::with_capacity(urls.len());
        for url in &urls {
            images.push(self.image_repo.append(id, url, caption).await?);
        }

        if property.image_url.is_none() {
            let changes = crate::models::PropertyChanges {
                image_url: urls.first().cloned(),
                ..Default::default()
            };
            self.property_repo.update(id, &changes).await?;
        }

        Ok(images)
    }

    pub async fn remove_image(&self, id: Uuid, image_id: Uuid) -> AppResult<()> {
        let image = self
            .image_repo
            .delete(id, image_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

        if let Err(e) = self.uploads.remove_by_url(&image.url).await {
            warn!("Could not remove image file {}: {}", image.url, e);
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Property> {
        self.property_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".into()))
    }

    async fn store_images(&self, files: &[UploadedFile]) -> AppResult<Vec<String>> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            urls.push(self.uploads.save_property_image(file).await?);
        }
        Ok(urls)
    }

    /// Reject unknown category / amenity / feature ids before writing anything
    async fn check_references(&self, form: &PropertyForm) -> AppResult<()> {
        if let Some(category_id) = form.changes.category_id {
            if self.category_repo.find_by_id(category_id).await?.is_none() {
                return Err(AppError::Validation(format!("Unknown category {}", category_id)));
            }
        }
        if let Some(ids) = &form.amenity_ids {
            if self.amenity_repo.count_existing(ids).await? != ids.len() as i64 {
                return Err(AppError::Validation("Unknown amenity id".into()));
            }
        }
        if let Some(ids) = &form.feature_ids {
            if self.feature_repo.count_existing(ids).await? != ids.len() as i64 {
                return Err(AppError::Validation("Unknown feature id".into()));
            }
        }
        Ok(())
    }

    async fn apply_relations(&self, id: Uuid, form: &PropertyForm) -> AppResult<()> {
        if let Some(ids) = &form.amenity_ids {
            self.property_repo.set_amenities(id, ids).await?;
        }
        if let Some(ids) = &form.feature_ids {
            self.property_repo.set_features(id, ids).await?;
        }
        Ok(())
    }
}
