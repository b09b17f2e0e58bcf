use crate::error::RepositoryResult;
use crate::models::Amenity;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for amenities
pub struct AmenityRepository {
    pool: PgPool,
}

impl AmenityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, icon: Option<&str>) -> RepositoryResult<Amenity> {
        let amenity = sqlx::query_as::<_, Amenity>(
            "INSERT INTO amenities (name, icon) VALUES ($1, $2) RETURNING id, name, icon",
        )
        .bind(name)
        .bind(icon)
        .fetch_one(&self.pool)
        .await?;

        Ok(amenity)
    }

    pub async fn upsert_by_name(&self, name: &str, icon: Option<&str>) -> RepositoryResult<Amenity> {
        let amenity = sqlx::query_as::<_, Amenity>(
            "INSERT INTO amenities (name, icon) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET icon = EXCLUDED.icon \
             RETURNING id, name, icon",
        )
        .bind(name)
        .bind(icon)
        .fetch_one(&self.pool)
        .await?;

        Ok(amenity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Amenity>> {
        let amenity =
            sqlx::query_as::<_, Amenity>("SELECT id, name, icon FROM amenities WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(amenity)
    }

    pub async fn list(&self) -> RepositoryResult<Vec<Amenity>> {
        let amenities =
            sqlx::query_as::<_, Amenity>("SELECT id, name, icon FROM amenities ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(amenities)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
    ) -> RepositoryResult<Option<Amenity>> {
        let amenity = sqlx::query_as::<_, Amenity>(
            "UPDATE amenities SET name = COALESCE($2, name), icon = COALESCE($3, icon) \
             WHERE id = $1 RETURNING id, name, icon",
        )
        .bind(id)
        .bind(name)
        .bind(icon)
        .fetch_optional(&self.pool)
        .await?;

        Ok(amenity)
    }

    pub async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// How many of `ids` exist; used to reject unknown references
    pub async fn count_existing(&self, ids: &[Uuid]) -> RepositoryResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM amenities WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
