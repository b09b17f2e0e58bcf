pub mod account_service;
pub mod contact_service;
pub mod property_form;
pub mod property_service;
pub mod validation;

pub use account_service::AccountService;
pub use contact_service::ContactService;
pub use property_form::{FormFields, PropertyForm};
pub use property_service::PropertyService;
