use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Triage state of a contact-form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Archived,
}

impl ContactStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "new" => Ok(ContactStatus::New),
            "read" => Ok(ContactStatus::Read),
            "archived" => Ok(ContactStatus::Archived),
            _ => Err(format!("Invalid contact status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Archived => "archived",
        }
    }
}

impl From<String> for ContactStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(ContactStatus::New)
    }
}

/// Contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub property_id: Option<Uuid>, // Set when sent from a listing page
    pub status: String,            // Stored as TEXT, use ContactStatus enum for type safety
    pub created_at: NaiveDateTime,
}

impl Contact {
    /// Get status as an enum
    pub fn status_enum(&self) -> ContactStatus {
        ContactStatus::from_str(&self.status).unwrap_or(ContactStatus::New)
    }
}
