//! Searchable documents and how site content becomes one.

use meridian_core::career::Career;
use meridian_core::news::NewsPost;
use meridian_core::product::Product;
use meridian_core::site::SitePage;
use serde::Serialize;

pub const PRODUCT_PRIORITY: u8 = 6;
pub const NEWS_PRIORITY: u8 = 5;
pub const CAREER_PRIORITY: u8 = 4;

/// Where a search entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Page,
    Product,
    News,
    Career,
}

/// One document in the search corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub url: String,
    pub priority: u8,
}

impl From<&SitePage> for SearchEntry {
    fn from(page: &SitePage) -> Self {
        SearchEntry {
            id: format!("page-{}", page.id),
            kind: EntryKind::Page,
            title: page.title.to_string(),
            description: page.description.to_string(),
            content: page.body.to_string(),
            category: page.category.to_string(),
            keywords: page.keywords.iter().map(|k| k.to_string()).collect(),
            url: page.path.to_string(),
            priority: page.priority,
        }
    }
}

impl From<&Product> for SearchEntry {
    fn from(product: &Product) -> Self {
        let mut keywords = vec![product.category.to_lowercase()];
        keywords.extend(
            product
                .name
                .split_whitespace()
                .map(|w| w.to_lowercase())
                .filter(|w| w.chars().count() >= 2),
        );
        SearchEntry {
            id: format!("product-{}", product.id),
            kind: EntryKind::Product,
            title: product.name.clone(),
            description: product.description.clone(),
            content: product.features.clone().unwrap_or_default(),
            category: product.category.clone(),
            keywords,
            url: format!("/products/{}", product.id),
            priority: PRODUCT_PRIORITY,
        }
    }
}

impl From<&NewsPost> for SearchEntry {
    fn from(post: &NewsPost) -> Self {
        SearchEntry {
            id: format!("news-{}", post.id),
            kind: EntryKind::News,
            title: post.title.clone(),
            description: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            keywords: vec![post.category.to_lowercase()],
            url: format!("/news/{}", post.id),
            priority: NEWS_PRIORITY,
        }
    }
}

impl From<&Career> for SearchEntry {
    fn from(career: &Career) -> Self {
        SearchEntry {
            id: format!("career-{}", career.id),
            kind: EntryKind::Career,
            title: career.title.clone(),
            description: format!("{} · {}", career.department, career.location),
            content: career.description.clone(),
            category: "Careers".to_string(),
            keywords: vec![
                career.department.to_lowercase(),
                career.location.to_lowercase(),
                career.employment_type.to_lowercase(),
            ],
            url: format!("/careers/{}", career.id),
            priority: CAREER_PRIORITY,
        }
    }
}
