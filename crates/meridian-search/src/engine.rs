//! Ranking over the merged corpus.

use crate::entry::{EntryKind, SearchEntry};
use crate::index::static_index;
use crate::scorer::{score, PreparedQuery};
use meridian_core::career::Career;
use meridian_core::news::NewsPost;
use meridian_core::product::Product;
use meridian_core::types::{CareerFilter, NewsFilter, ProductFilter};
use meridian_core::ContentStore;
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;
const SNIPPET_CHARS: usize = 160;

/// Database-backed collections merged into the static index.
///
/// `None` means the collection could not be loaded and is skipped.
#[derive(Debug, Clone, Default)]
pub struct RemoteCollections {
    pub news: Option<Vec<NewsPost>>,
    pub careers: Option<Vec<Career>>,
    pub products: Option<Vec<Product>>,
}

impl RemoteCollections {
    /// True when no collection made it.
    pub fn is_unavailable(&self) -> bool {
        self.news.is_none() && self.careers.is_none() && self.products.is_none()
    }

    fn entries(&self) -> impl Iterator<Item = SearchEntry> + '_ {
        let news = self.news.iter().flatten().map(SearchEntry::from);
        let careers = self.careers.iter().flatten().map(SearchEntry::from);
        let products = self.products.iter().flatten().map(SearchEntry::from);
        news.chain(careers).chain(products)
    }
}

/// A ranked result as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    /// Matches before truncation.
    pub total: usize,
    pub results: Vec<SearchHit>,
}

impl SearchResults {
    fn empty(query: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            total: 0,
            results: Vec::new(),
        }
    }
}

/// Clamps a requested result count into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Scores the static index plus any loaded collections and keeps the best.
///
/// Results are ordered by score, then priority; ties keep corpus order
/// (static pages, news, careers, products).
pub fn perform_search(
    query: &str,
    collections: &RemoteCollections,
    limit: Option<usize>,
) -> SearchResults {
    rank(query, static_index().into_iter().chain(collections.entries()), limit)
}

/// Static-only search, used when no remote collection is available.
pub fn simple_search(query: &str, limit: Option<usize>) -> SearchResults {
    rank(query, static_index().into_iter(), limit)
}

fn rank(
    query: &str,
    corpus: impl Iterator<Item = SearchEntry>,
    limit: Option<usize>,
) -> SearchResults {
    let Some(prepared) = PreparedQuery::new(query) else {
        return SearchResults::empty(query);
    };

    let mut scored: Vec<(u32, SearchEntry)> = corpus
        .map(|entry| (score(&entry, &prepared), entry))
        .filter(|(s, _)| *s > 0)
        .collect();
    // sort_by is stable, so equal keys keep corpus order.
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then(b.priority.cmp(&a.priority)));

    let total = scored.len();
    scored.truncate(clamp_limit(limit));
    debug!(query = %prepared.text, total, "search ranked");

    SearchResults {
        query: prepared.text,
        total,
        results: scored
            .into_iter()
            .map(|(s, e)| SearchHit {
                id: e.id,
                kind: e.kind,
                title: e.title,
                description: snippet(&e.description, SNIPPET_CHARS),
                url: e.url,
                category: e.category,
                score: s,
            })
            .collect(),
    }
}

/// Loads the public news, careers and products collections concurrently.
///
/// A failing collection is logged and left out rather than failing the search.
pub async fn gather_collections(store: &dyn ContentStore) -> RemoteCollections {
    let news_filter = NewsFilter::published();
    let career_filter = CareerFilter { active_only: true };
    let product_filter = ProductFilter::default();
    let (news, careers, products) = tokio::join!(
        store.list_news(&news_filter),
        store.list_careers(&career_filter),
        store.list_products(&product_filter),
    );

    RemoteCollections {
        news: news
            .map_err(|e| warn!(error = %e, "search: news collection unavailable"))
            .ok(),
        careers: careers
            .map_err(|e| warn!(error = %e, "search: careers collection unavailable"))
            .ok(),
        products: products
            .map_err(|e| warn!(error = %e, "search: products collection unavailable"))
            .ok(),
    }
}

/// Searches the whole corpus, degrading to [`simple_search`] when the store is down.
pub async fn search_site(
    store: &dyn ContentStore,
    query: &str,
    limit: Option<usize>,
) -> SearchResults {
    if PreparedQuery::new(query).is_none() {
        return SearchResults::empty(query);
    }
    let collections = gather_collections(store).await;
    if collections.is_unavailable() {
        warn!("search: falling back to static index");
        return simple_search(query, limit);
    }
    perform_search(query, &collections, limit)
}

fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meridian_core::career::CareerInput;
    use meridian_core::news::NewsPostInput;
    use meridian_core::product::ProductInput;

    fn product(id: i64, name: &str, category: &str) -> Product {
        ProductInput {
            name: name.into(),
            category: category.into(),
            description: format!("{} for industrial duty", name),
            ..Default::default()
        }
        .into_product(id, Utc::now())
    }

    fn news(id: i64, title: &str) -> NewsPost {
        NewsPostInput {
            title: title.into(),
            excerpt: "Announcement".into(),
            content: "Full story".into(),
            category: "Company".into(),
            published: true,
            ..Default::default()
        }
        .into_post(id, Utc::now())
    }

    fn career(id: i64, title: &str) -> Career {
        CareerInput {
            title: title.into(),
            department: "Engineering".into(),
            location: "Eindhoven".into(),
            employment_type: "Full-time".into(),
            description: "Design rotating equipment".into(),
            requirements: None,
            active: true,
        }
        .into_career(id, Utc::now())
    }

    #[test]
    fn exact_title_outranks_keyword_only_match() {
        let collections = RemoteCollections {
            news: Some(vec![news(1, "Hiring")]),
            ..Default::default()
        };
        let results = perform_search("hiring", &collections, None);
        // "Careers" page carries "hiring" only as a keyword.
        let pos = |id: &str| results.results.iter().position(|h| h.id == id).unwrap();
        assert!(pos("news-1") < pos("page-careers"));
        assert_eq!(results.results[0].id, "news-1");
    }

    #[test]
    fn short_query_returns_nothing() {
        let results = perform_search(" x ", &RemoteCollections::default(), None);
        assert_eq!(results.total, 0);
        assert!(results.results.is_empty());
    }

    #[test]
    fn remote_content_is_searchable() {
        let collections = RemoteCollections {
            products: Some(vec![product(3, "Butterfly Valve BV-100", "Valves")]),
            careers: Some(vec![career(4, "Hydraulics Engineer")]),
            news: None,
        };
        let results = perform_search("butterfly", &collections, None);
        assert_eq!(results.results[0].id, "product-3");
        assert_eq!(results.results[0].url, "/products/3");

        let results = perform_search("hydraulics engineer", &collections, None);
        assert_eq!(results.results[0].kind, EntryKind::Career);
    }

    #[test]
    fn missing_collections_are_skipped() {
        let results = perform_search("butterfly", &RemoteCollections::default(), None);
        assert!(results.results.iter().all(|h| h.kind == EntryKind::Page));
    }

    #[test]
    fn priority_breaks_score_ties() {
        let entry = |id: &str, priority: u8| SearchEntry {
            id: id.to_string(),
            kind: EntryKind::Page,
            title: "Gasket kit".into(),
            description: String::new(),
            content: String::new(),
            category: String::new(),
            keywords: Vec::new(),
            url: "/".into(),
            priority,
        };
        let corpus = vec![entry("low", 1), entry("high", 9), entry("low-2", 1)];
        let results = rank("gasket", corpus.into_iter(), None);
        let ids: Vec<_> = results.results.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low", "low-2"]);
    }

    #[test]
    fn limit_truncates_but_total_counts_all() {
        let products: Vec<Product> = (1..=30)
            .map(|i| product(i, &format!("Pump model {}", i), "Pumps"))
            .collect();
        let collections = RemoteCollections {
            products: Some(products),
            ..Default::default()
        };
        let results = perform_search("pump", &collections, Some(5));
        assert_eq!(results.results.len(), 5);
        assert!(results.total > 30);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), MAX_LIMIT);
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
    }

    #[test]
    fn long_descriptions_are_snipped() {
        let text = "a".repeat(200);
        let s = snippet(&text, 10);
        assert_eq!(s.chars().count(), 11);
        assert!(s.ends_with('…'));
        assert_eq!(snippet("short", 10), "short");
    }
}
