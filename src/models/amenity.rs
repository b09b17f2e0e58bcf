use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Building or community amenity (pool, gym, concierge)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}
