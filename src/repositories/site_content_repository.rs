use crate::error::RepositoryResult;
use crate::models::SiteContent;
use sqlx::PgPool;

/// Repository for editable page content
pub struct SiteContentRepository {
    pool: PgPool,
}

impl SiteContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> RepositoryResult<Vec<SiteContent>> {
        let blocks = sqlx::query_as::<_, SiteContent>(
            "SELECT key, title, body, updated_at FROM site_content ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(blocks)
    }

    pub async fn find(&self, key: &str) -> RepositoryResult<Option<SiteContent>> {
        let block = sqlx::query_as::<_, SiteContent>(
            "SELECT key, title, body, updated_at FROM site_content WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(block)
    }

    pub async fn upsert(
        &self,
        key: &str,
        title: Option<&str>,
        body: &str,
    ) -> RepositoryResult<SiteContent> {
        let block = sqlx::query_as::<_, SiteContent>(
            "INSERT INTO site_content (key, title, body) VALUES ($1, $2, $3) \
             ON CONFLICT (key) DO UPDATE \
             SET title = EXCLUDED.title, body = EXCLUDED.body, \
                 updated_at = (NOW() AT TIME ZONE 'utc') \
             RETURNING key, title, body, updated_at",
        )
        .bind(key)
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(block)
    }
}
