use crate::error::RepositoryResult;
use crate::models::PropertyImage;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for property gallery images
pub struct PropertyImageRepository {
    pool: PgPool,
}

impl PropertyImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an image at the end of the gallery
    pub async fn append(
        &self,
        property_id: Uuid,
        url: &str,
        caption: Option<&str>,
    ) -> RepositoryResult<PropertyImage> {
        let image = sqlx::query_as::<_, PropertyImage>(
            "INSERT INTO property_images (property_id, url, caption, sort_order) \
             VALUES ($1, $2, $3, \
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM property_images WHERE property_id = $1)) \
             RETURNING id, property_id, url, caption, sort_order, created_at",
        )
        .bind(property_id)
        .bind(url)
        .bind(caption)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    /// Gallery in display order
    pub async fn find_by_property(&self, property_id: Uuid) -> RepositoryResult<Vec<PropertyImage>> {
        let images = sqlx::query_as::<_, PropertyImage>(
            "SELECT id, property_id, url, caption, sort_order, created_at \
             FROM property_images WHERE property_id = $1 ORDER BY sort_order, created_at",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Remove one image, scoped to its property. Returns the removed row.
    pub async fn delete(
        &self,
        property_id: Uuid,
        image_id: Uuid,
    ) -> RepositoryResult<Option<PropertyImage>> {
        let image = sqlx::query_as::<_, PropertyImage>(
            "DELETE FROM property_images WHERE id = $1 AND property_id = $2 \
             RETURNING id, property_id, url, caption, sort_order, created_at",
        )
        .bind(image_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn exists(&self, property_id: Uuid, url: &str) -> RepositoryResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM property_images WHERE property_id = $1 AND url = $2)",
        )
        .bind(property_id)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
