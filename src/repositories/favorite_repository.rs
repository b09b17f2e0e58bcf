use crate::error::RepositoryResult;
use crate::models::{Favorite, Property};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for saved properties
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Save a property for a user.
    ///
    /// Returns the favorite and whether it was newly created; saving the
    /// same property twice leaves the original row in place.
    pub async fn add(&self, user_id: Uuid, property_id: Uuid) -> RepositoryResult<(Favorite, bool)> {
        let inserted = sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, property_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, property_id) DO NOTHING \
             RETURNING id, user_id, property_id, created_at",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(favorite) = inserted {
            return Ok((favorite, true));
        }

        let existing = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, property_id, created_at FROM favorites \
             WHERE user_id = $1 AND property_id = $2",
        )
        .bind(user_id)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    pub async fn remove(&self, user_id: Uuid, property_id: Uuid) -> RepositoryResult<bool> {
        let rows_affected =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND property_id = $2")
                .bind(user_id)
                .bind(property_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows_affected > 0)
    }

    /// The user's saved properties, most recently saved first
    pub async fn properties_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(
            "SELECT p.id, p.title, p.description, p.property_type, p.status, p.price, \
                    p.address, p.city, p.state, p.zip_code, p.bedrooms, p.bathrooms, \
                    p.size_sqft, p.year_built, p.category_id, p.owner_id, p.featured, \
                    p.image_url, p.created_at, p.updated_at \
             FROM favorites f \
             JOIN properties p ON p.id = f.property_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }
}
