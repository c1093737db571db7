// crates/meridian-core/src/store/in_memory_store.rs

use crate::career::{Career, CareerInput};
use crate::certificate::{Certificate, CertificateInput};
use crate::contact::{ContactMessage, ContactSubmission};
use crate::errors::MeridianError;
use crate::news::{NewsPost, NewsPostInput};
use crate::product::{Product, ProductInput};
use crate::store::{sort_certificates, sort_news, sort_products, ContentStore};
use crate::types::{
    same_category, CareerFilter, CareerId, CertificateId, DashboardStats, NewsFilter, NewsId,
    ProductFilter, ProductId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    products: BTreeMap<ProductId, Product>,
    news: BTreeMap<NewsId, NewsPost>,
    certificates: BTreeMap<CertificateId, Certificate>,
    careers: BTreeMap<CareerId, Career>,
    messages: Vec<ContactMessage>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// An in-memory implementation of the `ContentStore` trait.
///
/// All tables live behind one thread-safe lock. Ids come from a single
/// counter shared by every table, so they are unique store-wide. Used by the
/// tests and when the server runs without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryContentStore {
    /// Creates a new, empty `InMemoryContentStore`.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Tables>, MeridianError> {
        self.tables.lock().map_err(|e| {
            MeridianError::InternalError(format!("Failed to acquire lock for {}: {}", op, e))
        })
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, MeridianError> {
        let tables = self.lock("list_products")?;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| !filter.featured_only || p.featured)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| same_category(&p.category, c))
            })
            .cloned()
            .collect();
        sort_products(&mut products);
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, MeridianError> {
        Ok(self.lock("get_product")?.products.get(&id).cloned())
    }

    async fn create_product(&self, input: ProductInput) -> Result<Product, MeridianError> {
        let mut tables = self.lock("create_product")?;
        let id = tables.allocate_id();
        let product = input.into_product(id, Utc::now());
        tables.products.insert(id, product.clone());
        debug!(id, "created product");
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, MeridianError> {
        let mut tables = self.lock("update_product")?;
        let Some(existing) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        let created_at = existing.created_at;
        let mut updated = input.into_product(id, Utc::now());
        updated.created_at = created_at;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, MeridianError> {
        Ok(self.lock("delete_product")?.products.remove(&id).is_some())
    }

    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsPost>, MeridianError> {
        let tables = self.lock("list_news")?;
        let mut posts: Vec<NewsPost> = tables
            .news
            .values()
            .filter(|p| !filter.published_only || p.published)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| same_category(&p.category, c))
            })
            .cloned()
            .collect();
        sort_news(&mut posts);
        if let Some(limit) = filter.limit {
            posts.truncate(limit as usize);
        }
        Ok(posts)
    }

    async fn get_news(&self, id: NewsId) -> Result<Option<NewsPost>, MeridianError> {
        Ok(self.lock("get_news")?.news.get(&id).cloned())
    }

    async fn create_news(&self, input: NewsPostInput) -> Result<NewsPost, MeridianError> {
        let mut tables = self.lock("create_news")?;
        let id = tables.allocate_id();
        let post = input.into_post(id, Utc::now());
        tables.news.insert(id, post.clone());
        debug!(id, published = post.published, "created news post");
        Ok(post)
    }

    async fn update_news(
        &self,
        id: NewsId,
        input: NewsPostInput,
    ) -> Result<Option<NewsPost>, MeridianError> {
        let mut tables = self.lock("update_news")?;
        let Some(existing) = tables.news.get_mut(&id) else {
            return Ok(None);
        };
        let now = Utc::now();
        let published_at = input.resolve_published_at(existing.published_at, now);
        let created_at = existing.created_at;
        let mut updated = input.into_post(id, now);
        updated.published_at = published_at;
        updated.created_at = created_at;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_news(&self, id: NewsId) -> Result<bool, MeridianError> {
        Ok(self.lock("delete_news")?.news.remove(&id).is_some())
    }

    async fn list_certificates(&self) -> Result<Vec<Certificate>, MeridianError> {
        let tables = self.lock("list_certificates")?;
        let mut certs: Vec<Certificate> = tables.certificates.values().cloned().collect();
        sort_certificates(&mut certs);
        Ok(certs)
    }

    async fn get_certificate(
        &self,
        id: CertificateId,
    ) -> Result<Option<Certificate>, MeridianError> {
        Ok(self.lock("get_certificate")?.certificates.get(&id).cloned())
    }

    async fn create_certificate(
        &self,
        input: CertificateInput,
    ) -> Result<Certificate, MeridianError> {
        let mut tables = self.lock("create_certificate")?;
        let id = tables.allocate_id();
        let cert = input.into_certificate(id, Utc::now());
        tables.certificates.insert(id, cert.clone());
        Ok(cert)
    }

    async fn update_certificate(
        &self,
        id: CertificateId,
        input: CertificateInput,
    ) -> Result<Option<Certificate>, MeridianError> {
        let mut tables = self.lock("update_certificate")?;
        let Some(existing) = tables.certificates.get_mut(&id) else {
            return Ok(None);
        };
        let updated = input.into_certificate(id, existing.created_at);
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_certificate(&self, id: CertificateId) -> Result<bool, MeridianError> {
        Ok(self
            .lock("delete_certificate")?
            .certificates
            .remove(&id)
            .is_some())
    }

    async fn list_careers(&self, filter: &CareerFilter) -> Result<Vec<Career>, MeridianError> {
        let tables = self.lock("list_careers")?;
        let mut careers: Vec<Career> = tables
            .careers
            .values()
            .filter(|c| !filter.active_only || c.active)
            .cloned()
            .collect();
        careers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(careers)
    }

    async fn get_career(&self, id: CareerId) -> Result<Option<Career>, MeridianError> {
        Ok(self.lock("get_career")?.careers.get(&id).cloned())
    }

    async fn create_career(&self, input: CareerInput) -> Result<Career, MeridianError> {
        let mut tables = self.lock("create_career")?;
        let id = tables.allocate_id();
        let career = input.into_career(id, Utc::now());
        tables.careers.insert(id, career.clone());
        Ok(career)
    }

    async fn update_career(
        &self,
        id: CareerId,
        input: CareerInput,
    ) -> Result<Option<Career>, MeridianError> {
        let mut tables = self.lock("update_career")?;
        let Some(existing) = tables.careers.get_mut(&id) else {
            return Ok(None);
        };
        let created_at = existing.created_at;
        let mut updated = input.into_career(id, Utc::now());
        updated.created_at = created_at;
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_career(&self, id: CareerId) -> Result<bool, MeridianError> {
        Ok(self.lock("delete_career")?.careers.remove(&id).is_some())
    }

    async fn create_contact_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, MeridianError> {
        let mut tables = self.lock("create_contact_message")?;
        let id = tables.allocate_id();
        let message = submission.into_message(id, Utc::now());
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn list_contact_messages(
        &self,
        limit: u32,
    ) -> Result<Vec<ContactMessage>, MeridianError> {
        let tables = self.lock("list_contact_messages")?;
        // Appended in arrival order, so newest is last.
        Ok(tables
            .messages
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, MeridianError> {
        let tables = self.lock("dashboard_stats")?;
        let count = |n: usize| n as i64;
        Ok(DashboardStats {
            products: count(tables.products.len()),
            featured_products: count(tables.products.values().filter(|p| p.featured).count()),
            news_posts: count(tables.news.len()),
            published_news_posts: count(tables.news.values().filter(|p| p.published).count()),
            certificates: count(tables.certificates.len()),
            careers: count(tables.careers.len()),
            active_careers: count(tables.careers.values().filter(|c| c.active).count()),
            contact_messages: count(tables.messages.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;
    use tokio::time::sleep;

    fn product(name: &str, category: &str, featured: bool) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: category.to_string(),
            description: format!("{} description", name),
            featured,
            ..Default::default()
        }
    }

    fn post(title: &str, published: bool) -> NewsPostInput {
        NewsPostInput {
            title: title.to_string(),
            content: "body".to_string(),
            category: "Company".to_string(),
            published,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryContentStore::new();
        assert!(store
            .list_products(&ProductFilter::default())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.dashboard_stats().await.unwrap(), DashboardStats::default());
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let store = InMemoryContentStore::new();
        let created = store.create_product(product("Pump", "Pumps", false)).await.unwrap();
        let fetched = store.get_product(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert!(store.get_product(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_products_featured_first_and_category_filter() {
        let store = InMemoryContentStore::new();
        let plain = store.create_product(product("Valve", "Valves", false)).await.unwrap();
        sleep(Duration::from_millis(5)).await;
        let newer = store.create_product(product("Skid", "Skids", false)).await.unwrap();
        let featured = store.create_product(product("Pump", "Pumps", true)).await.unwrap();

        let all = store.list_products(&ProductFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![featured.id, newer.id, plain.id]);

        let valves = store
            .list_products(&ProductFilter {
                category: Some("VALVES".into()),
                featured_only: false,
            })
            .await
            .unwrap();
        assert_eq!(valves.len(), 1);
        assert_eq!(valves[0].id, plain.id);

        let only_featured = store
            .list_products(&ProductFilter {
                category: None,
                featured_only: true,
            })
            .await
            .unwrap();
        assert_eq!(only_featured.len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let store = InMemoryContentStore::new();
        let created = store.create_product(product("Pump", "Pumps", false)).await.unwrap();
        sleep(Duration::from_millis(10)).await;
        let updated = store
            .update_product(created.id, product("Pump Mk2", "Pumps", true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.name, "Pump Mk2");
        assert!(store
            .update_product(4242, product("x", "y", false))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = InMemoryContentStore::new();
        let created = store.create_career(CareerInput {
            title: "Machinist".into(),
            department: "Production".into(),
            location: "Eindhoven".into(),
            employment_type: "Full-time".into(),
            description: "CNC turning".into(),
            requirements: None,
            active: true,
        })
        .await
        .unwrap();
        assert!(store.delete_career(created.id).await.unwrap());
        assert!(!store.delete_career(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_news_published_filter_and_limit() {
        let store = InMemoryContentStore::new();
        store.create_news(post("Draft", false)).await.unwrap();
        store.create_news(post("First", true)).await.unwrap();
        sleep(Duration::from_millis(5)).await;
        store.create_news(post("Second", true)).await.unwrap();

        let published = store.list_news(&NewsFilter::published()).await.unwrap();
        let titles: Vec<_> = published.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);

        let limited = store
            .list_news(&NewsFilter {
                limit: Some(1),
                ..NewsFilter::published()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);

        let everything = store.list_news(&NewsFilter::default()).await.unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn test_publishing_a_draft_stamps_date_once() {
        let store = InMemoryContentStore::new();
        let draft = store.create_news(post("Draft", false)).await.unwrap();
        assert!(draft.published_at.is_none());

        let published = store
            .update_news(draft.id, post("Draft", true))
            .await
            .unwrap()
            .unwrap();
        let stamped = published.published_at.expect("stamped on publish");

        sleep(Duration::from_millis(5)).await;
        let edited = store
            .update_news(draft.id, post("Draft edited", true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(edited.published_at, Some(stamped));
    }

    #[tokio::test]
    async fn test_certificates_undated_last() {
        let store = InMemoryContentStore::new();
        let undated = store
            .create_certificate(CertificateInput {
                title: "CE".into(),
                issuer: "EU".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let iso = store
            .create_certificate(CertificateInput {
                title: "ISO 9001".into(),
                issuer: "TÜV".into(),
                issued_on: NaiveDate::from_ymd_opt(2023, 1, 10),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<_> = store
            .list_certificates()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![iso.id, undated.id]);
    }

    #[tokio::test]
    async fn test_contact_messages_newest_first_and_stats() {
        let store = InMemoryContentStore::new();
        for i in 0..3 {
            store
                .create_contact_message(ContactSubmission {
                    name: format!("Visitor {}", i),
                    email: "v@example.com".into(),
                    subject: "Quote".into(),
                    message: "Hello".into(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        let latest = store.list_contact_messages(2).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].name, "Visitor 2");

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.contact_messages, 3);
    }
}
