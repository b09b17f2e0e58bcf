use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// In-unit feature (hardwood floors, fireplace)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}
