use crate::error::RepositoryResult;
use crate::models::Feature;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for in-unit features
pub struct FeatureRepository {
    pool: PgPool,
}

impl FeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> RepositoryResult<Feature> {
        let feature = sqlx::query_as::<_, Feature>(
            "INSERT INTO features (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn upsert_by_name(&self, name: &str, description: Option<&str>) -> RepositoryResult<Feature> {
        let feature = sqlx::query_as::<_, Feature>(
            "INSERT INTO features (name, description) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description \
             RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Feature>> {
        let feature =
            sqlx::query_as::<_, Feature>("SELECT id, name, description FROM features WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(feature)
    }

    pub async fn list(&self) -> RepositoryResult<Vec<Feature>> {
        let features =
            sqlx::query_as::<_, Feature>("SELECT id, name, description FROM features ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(features)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> RepositoryResult<Option<Feature>> {
        let feature = sqlx::query_as::<_, Feature>(
            "UPDATE features SET name = COALESCE($2, name), description = COALESCE($3, description) \
             WHERE id = $1 RETURNING id, name, description",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// How many of `ids` exist; used to reject unknown references
    pub async fn count_existing(&self, ids: &[Uuid]) -> RepositoryResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM features WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
