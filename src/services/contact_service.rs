use crate::error::{AppError, AppResult};
use crate::models::{Contact, ContactStatus};
use crate::repositories::{ContactRepository, PropertyRepository};
use crate::services::validation::not_blank;
use garde::Validate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Public contact-form payload
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[garde(length(max = 120), custom(not_blank))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(length(max = 200))]
    pub subject: Option<String>,
    #[garde(length(max = 5000), custom(not_blank))]
    pub message: String,
    #[garde(skip)]
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusUpdate {
    pub status: ContactStatus,
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct ContactService {
    contact_repo: Arc<ContactRepository>,
    property_repo: Arc<PropertyRepository>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<ContactRepository>, property_repo: Arc<PropertyRepository>) -> Self {
        Self {
            contact_repo,
            property_repo,
        }
    }

    /// Store a submission. Fields are checked before the database is touched.
    pub async fn submit(&self, request: ContactRequest) -> AppResult<Contact> {
        request.validate()?;

        if let Some(property_id) = request.property_id {
            if self.property_repo.find_by_id(property_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Unknown property {}",
                    property_id
                )));
            }
        }

        let contact = self
            .contact_repo
            .create(
                request.name.trim(),
                &request.email.trim().to_lowercase(),
                blank_to_none(request.phone.as_deref()),
                blank_to_none(request.subject.as_deref()),
                request.message.trim(),
                request.property_id,
            )
            .await?;

        info!(
            contact_id = %contact.id,
            property_id = ?contact.property_id,
            "New contact submission"
        );
        Ok(contact)
    }

    pub async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<Contact>> {
        Ok(self.contact_repo.list(status).await?)
    }

    pub async fn update_status(&self, id: Uuid, status: ContactStatus) -> AppResult<Contact> {
        self.contact_repo
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.contact_repo.delete(id).await? {
            return Err(AppError::NotFound("Contact not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            subject: None,
            message: message.to_string(),
            property_id: None,
        }
    }

    #[test]
    fn test_contact_request_validation() {
        assert!(request("Jane", "jane@example.com", "Is it still available?")
            .validate()
            .is_ok());
        assert!(request(" ", "jane@example.com", "Hello").validate().is_err());
        assert!(request("Jane", "not-an-email", "Hello").validate().is_err());
        assert!(request("Jane", "jane@example.com", "").validate().is_err());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some("  ")), None);
        assert_eq!(blank_to_none(Some(" 555-0100 ")), Some("555-0100"));
        assert_eq!(blank_to_none(None), None);
    }
}
