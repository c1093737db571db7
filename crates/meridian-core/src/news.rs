//! News and blog posts.

use crate::types::NewsId;
use crate::validation::{
    clean_optional, optional_image_url, optional_text, require_text, MAX_EXCERPT_LEN,
    MAX_LABEL_LEN, MAX_TITLE_LEN,
};
use crate::MeridianError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news post as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct NewsPost {
    pub id: NewsId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsPost {
    /// Timestamp used for ordering listings.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.created_at)
    }
}

/// Admin payload for creating or replacing a news post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewsPostInput {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsPostInput {
    pub fn validate(&self) -> Result<(), MeridianError> {
        require_text("news.title", &self.title, MAX_TITLE_LEN)?;
        optional_text("news.excerpt", Some(&self.excerpt), MAX_EXCERPT_LEN)?;
        require_text("news.content", &self.content, 200_000)?;
        require_text("news.category", &self.category, MAX_LABEL_LEN)?;
        optional_text("news.author", self.author.as_deref(), MAX_LABEL_LEN)?;
        optional_image_url("news.image_url", self.image_url.as_deref())
    }

    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.trim().to_string(),
            category: self.category.trim().to_string(),
            author: clean_optional(self.author),
            image_url: clean_optional(self.image_url),
            published: self.published,
            published_at: self.published_at,
        }
    }

    /// Resolves `published_at` for a write at `now`.
    ///
    /// Publishing without a date stamps `now`; otherwise the explicit date wins,
    /// falling back to whatever the post carried before.
    pub fn resolve_published_at(
        &self,
        previous: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match (self.published_at, previous) {
            (Some(explicit), _) => Some(explicit),
            (None, Some(prev)) => Some(prev),
            (None, None) if self.published => Some(now),
            (None, None) => None,
        }
    }

    pub fn into_post(self, id: NewsId, now: DateTime<Utc>) -> NewsPost {
        let published_at = self.resolve_published_at(None, now);
        NewsPost {
            id,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            author: self.author,
            image_url: self.image_url,
            published: self.published,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }
}
