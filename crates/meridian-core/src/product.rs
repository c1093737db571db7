//! Product catalog entries.

use crate::types::ProductId;
use crate::validation::{
    clean_optional, optional_image_url, optional_text, require_text, MAX_LABEL_LEN, MAX_TITLE_LEN,
};
use crate::MeridianError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Newline separated bullet points.
    pub features: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin payload for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), MeridianError> {
        require_text("product.name", &self.name, MAX_TITLE_LEN)?;
        require_text("product.category", &self.category, MAX_LABEL_LEN)?;
        require_text("product.description", &self.description, 20_000)?;
        optional_text("product.features", self.features.as_deref(), 20_000)?;
        optional_image_url("product.image_url", self.image_url.as_deref())
    }

    /// Trimmed copy ready for storage.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            features: clean_optional(self.features),
            image_url: clean_optional(self.image_url),
            featured: self.featured,
        }
    }

    /// Materializes a stored product from this input.
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            features: self.features,
            image_url: self.image_url,
            featured: self.featured,
            created_at: now,
            updated_at: now,
        }
    }
}
