use crate::error::RepositoryResult;
use crate::models::{Contact, ContactStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for contact-form submissions
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        subject: Option<&str>,
        message: &str,
        property_id: Option<Uuid>,
    ) -> RepositoryResult<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (name, email, phone, subject, message, property_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, phone, subject, message, property_id, status, created_at",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(subject)
        .bind(message)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Newest first, optionally narrowed to one status
    pub async fn list(&self, status: Option<ContactStatus>) -> RepositoryResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, phone, subject, message, property_id, status, created_at \
             FROM contacts \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT id, name, email, phone, subject, message, property_id, status, created_at \
             FROM contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> RepositoryResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET status = $2 WHERE id = $1 \
             RETURNING id, name, email, phone, subject, message, property_id, status, created_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    pub async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
