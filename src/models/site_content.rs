use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Editable text block shown on marketing pages, addressed by slug key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteContent {
    pub key: String,
    pub title: Option<String>,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

impl SiteContent {
    /// Keys are lowercase slugs: `[a-z0-9-]+`
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_keys() {
        assert!(SiteContent::is_valid_key("home-hero"));
        assert!(SiteContent::is_valid_key("about2"));
        assert!(!SiteContent::is_valid_key(""));
        assert!(!SiteContent::is_valid_key("Home"));
        assert!(!SiteContent::is_valid_key("about_us"));
        assert!(!SiteContent::is_valid_key("../etc"));
    }
}
