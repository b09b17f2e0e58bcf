use crate::error::RepositoryResult;
use crate::models::{Amenity, Feature, NewProperty, Property, PropertyChanges};
use sqlx::PgPool;
use uuid::Uuid;

macro_rules! property_columns {
    () => {
        "id, title, description, property_type, status, price, address, city, state, \
         zip_code, bedrooms, bathrooms, size_sqft, year_built, category_id, owner_id, \
         featured, image_url, created_at, updated_at"
    };
}

/// Repository for property data access
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    /// Create a new PropertyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new property
    pub async fn create(&self, new: &NewProperty) -> RepositoryResult<Property> {
        let property = sqlx::query_as::<_, Property>(concat!(
            "INSERT INTO properties (title, description, property_type, status, price, \
             address, city, state, zip_code, bedrooms, bathrooms, size_sqft, year_built, \
             category_id, owner_id, featured, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING ",
            property_columns!()
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.property_type.as_str())
        .bind(new.status.as_str())
        .bind(new.price)
        .bind(&new.address)
        .bind(&new.city)
        .bind(&new.state)
        .bind(&new.zip_code)
        .bind(new.bedrooms)
        .bind(new.bathrooms)
        .bind(new.size_sqft)
        .bind(new.year_built)
        .bind(new.category_id)
        .bind(new.owner_id)
        .bind(new.featured)
        .bind(&new.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    /// Find a property by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(concat!(
            "SELECT ",
            property_columns!(),
            " FROM properties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Find a property by its exact title (seed upserts key on this)
    pub async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(concat!(
            "SELECT ",
            property_columns!(),
            " FROM properties WHERE title = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Load the whole catalog, newest first
    pub async fn list_all(&self) -> RepositoryResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(concat!(
            "SELECT ",
            property_columns!(),
            " FROM properties ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    /// Featured properties, newest first
    pub async fn list_featured(&self, limit: i64) -> RepositoryResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(concat!(
            "SELECT ",
            property_columns!(),
            " FROM properties WHERE featured ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    /// Apply a partial update and bump `updated_at`
    pub async fn update(
        &self,
        id: Uuid,
        changes: &PropertyChanges,
    ) -> RepositoryResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(concat!(
            "UPDATE properties SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             property_type = COALESCE($4, property_type), \
             status = COALESCE($5, status), \
             price = COALESCE($6, price), \
             address = COALESCE($7, address), \
             city = COALESCE($8, city), \
             state = COALESCE($9, state), \
             zip_code = COALESCE($10, zip_code), \
             bedrooms = COALESCE($11, bedrooms), \
             bathrooms = COALESCE($12, bathrooms), \
             size_sqft = COALESCE($13, size_sqft), \
             year_built = COALESCE($14, year_built), \
             category_id = COALESCE($15, category_id), \
             featured = COALESCE($16, featured), \
             image_url = COALESCE($17, image_url), \
             updated_at = (NOW() AT TIME ZONE 'utc') \
             WHERE id = $1 RETURNING ",
            property_columns!()
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.property_type.map(|t| t.as_str()))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.price)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.size_sqft)
        .bind(changes.year_built)
        .bind(changes.category_id)
        .bind(changes.featured)
        .bind(&changes.image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    /// Delete a property; images, favorites and join rows cascade
    pub async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Replace the amenity set of a property
    pub async fn set_amenities(&self, property_id: Uuid, amenity_ids: &[Uuid]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM property_amenities WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        if !amenity_ids.is_empty() {
            sqlx::query(
                "INSERT INTO property_amenities (property_id, amenity_id) \
                 SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
            )
            .bind(property_id)
            .bind(amenity_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Replace the feature set of a property
    pub async fn set_features(&self, property_id: Uuid, feature_ids: &[Uuid]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM property_features WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        if !feature_ids.is_empty() {
            sqlx::query(
                "INSERT INTO property_features (property_id, feature_id) \
                 SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
            )
            .bind(property_id)
            .bind(feature_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn amenities_for(&self, property_id: Uuid) -> RepositoryResult<Vec<Amenity>> {
        let amenities = sqlx::query_as::<_, Amenity>(
            "SELECT a.id, a.name, a.icon FROM amenities a \
             JOIN property_amenities pa ON pa.amenity_id = a.id \
             WHERE pa.property_id = $1 ORDER BY a.name",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(amenities)
    }

    pub async fn features_for(&self, property_id: Uuid) -> RepositoryResult<Vec<Feature>> {
        let features = sqlx::query_as::<_, Feature>(
            "SELECT f.id, f.name, f.description FROM features f \
             JOIN property_features pf ON pf.feature_id = f.id \
             WHERE pf.property_id = $1 ORDER BY f.name",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(features)
    }

    pub async fn count(&self) -> RepositoryResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
