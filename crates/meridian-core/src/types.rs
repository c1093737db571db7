//! Common type definitions used throughout Meridian.

use serde::{Deserialize, Serialize};

/// Unique identifier for a Product.
pub type ProductId = i64;

/// Unique identifier for a News post.
pub type NewsId = i64;

/// Unique identifier for a Certificate.
pub type CertificateId = i64;

/// Unique identifier for a Career opening.
pub type CareerId = i64;

/// Unique identifier for a Contact message.
pub type MessageId = i64;

/// Narrows a product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive category match.
    pub category: Option<String>,
    /// Only return products flagged as featured.
    #[serde(default)]
    pub featured_only: bool,
}

/// Narrows a news listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFilter {
    /// Case-insensitive category match.
    pub category: Option<String>,
    /// Hide drafts.
    #[serde(default)]
    pub published_only: bool,
    /// Maximum number of posts to return.
    pub limit: Option<u32>,
}

impl NewsFilter {
    /// Filter used by the public site: published posts only.
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Default::default()
        }
    }
}

/// Narrows a careers listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerFilter {
    /// Hide closed openings.
    #[serde(default)]
    pub active_only: bool,
}

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub products: i64,
    pub featured_products: i64,
    pub news_posts: i64,
    pub published_news_posts: i64,
    pub certificates: i64,
    pub careers: i64,
    pub active_careers: i64,
    pub contact_messages: i64,
}

/// Case-insensitive equality used by category filters. Folds the full
/// Unicode range so it agrees with `LOWER()` on the MySQL side.
pub fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_category_ignores_case_and_padding() {
        assert!(same_category("Pumps", " pumps "));
        assert!(!same_category("Pumps", "Valves"));
    }

    #[test]
    fn test_same_category_folds_non_ascii() {
        assert!(same_category("Pompes Électriques", "pompes électriques"));
        assert!(same_category("ÜBERDRUCKVENTILE", "überdruckventile"));
    }
}
