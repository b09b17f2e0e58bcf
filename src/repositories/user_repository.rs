use crate::error::RepositoryResult;
use crate::models::{User, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, name, password_hash, role, phone, created_at";

/// Repository for user data access
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Emails are stored lowercased.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: UserRole,
        phone: Option<&str>,
    ) -> RepositoryResult<User> {
        let sql = format!(
            "INSERT INTO users (email, name, password_hash, role, phone) \
             VALUES (LOWER($1), $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(password_hash)
            .bind(role.as_str())
            .bind(phone)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Insert or refresh a user keyed by email (seed fixtures)
    pub async fn upsert_by_email(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: UserRole,
        phone: Option<&str>,
    ) -> RepositoryResult<User> {
        let sql = format!(
            "INSERT INTO users (email, name, password_hash, role, phone) \
             VALUES (LOWER($1), $2, $3, $4, $5) \
             ON CONFLICT (email) DO UPDATE \
             SET name = EXCLUDED.name, password_hash = EXCLUDED.password_hash, \
                 role = EXCLUDED.role, phone = EXCLUDED.phone \
             RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(name)
            .bind(password_hash)
            .bind(role.as_str())
            .bind(phone)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user by UUID
    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find a user by email, case-insensitively
    pub async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = LOWER($1)", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list(&self) -> RepositoryResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at DESC", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Update profile fields and role; `None` leaves a column unchanged
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        role: Option<UserRole>,
    ) -> RepositoryResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), phone = COALESCE($3, phone), \
             role = COALESCE($4, role) WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(name)
            .bind(phone)
            .bind(role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
