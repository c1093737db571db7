// crates/meridian-core/src/store.rs

//! Defines the persistence contract for site content.

use crate::career::{Career, CareerInput};
use crate::certificate::{Certificate, CertificateInput};
use crate::contact::{ContactMessage, ContactSubmission};
use crate::errors::MeridianError;
use crate::news::{NewsPost, NewsPostInput};
use crate::product::{Product, ProductInput};
use crate::types::{
    CareerFilter, CareerId, CertificateId, DashboardStats, NewsFilter, NewsId, ProductFilter,
    ProductId,
};
use async_trait::async_trait;

pub mod in_memory_store;

pub use in_memory_store::InMemoryContentStore;

/// Storage for everything the admin dashboard edits.
///
/// `get_*` and `update_*` return `Ok(None)` when the id does not exist and
/// `delete_*` reports whether a row was removed. Inputs are expected to be
/// validated and normalized by the caller.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, MeridianError>;
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, MeridianError>;
    async fn create_product(&self, input: ProductInput) -> Result<Product, MeridianError>;
    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, MeridianError>;
    async fn delete_product(&self, id: ProductId) -> Result<bool, MeridianError>;

    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsPost>, MeridianError>;
    async fn get_news(&self, id: NewsId) -> Result<Option<NewsPost>, MeridianError>;
    async fn create_news(&self, input: NewsPostInput) -> Result<NewsPost, MeridianError>;
    async fn update_news(
        &self,
        id: NewsId,
        input: NewsPostInput,
    ) -> Result<Option<NewsPost>, MeridianError>;
    async fn delete_news(&self, id: NewsId) -> Result<bool, MeridianError>;

    async fn list_certificates(&self) -> Result<Vec<Certificate>, MeridianError>;
    async fn get_certificate(&self, id: CertificateId)
        -> Result<Option<Certificate>, MeridianError>;
    async fn create_certificate(
        &self,
        input: CertificateInput,
    ) -> Result<Certificate, MeridianError>;
    async fn update_certificate(
        &self,
        id: CertificateId,
        input: CertificateInput,
    ) -> Result<Option<Certificate>, MeridianError>;
    async fn delete_certificate(&self, id: CertificateId) -> Result<bool, MeridianError>;

    async fn list_careers(&self, filter: &CareerFilter) -> Result<Vec<Career>, MeridianError>;
    async fn get_career(&self, id: CareerId) -> Result<Option<Career>, MeridianError>;
    async fn create_career(&self, input: CareerInput) -> Result<Career, MeridianError>;
    async fn update_career(
        &self,
        id: CareerId,
        input: CareerInput,
    ) -> Result<Option<Career>, MeridianError>;
    async fn delete_career(&self, id: CareerId) -> Result<bool, MeridianError>;

    async fn create_contact_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, MeridianError>;
    async fn list_contact_messages(&self, limit: u32)
        -> Result<Vec<ContactMessage>, MeridianError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, MeridianError>;
}

/// Orders products featured first, then newest first.
pub fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then(b.created_at.cmp(&a.created_at))
            .then(b.id.cmp(&a.id))
    });
}

/// Orders news newest first by publish date, falling back to creation date.
pub fn sort_news(posts: &mut [NewsPost]) {
    posts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()).then(b.id.cmp(&a.id)));
}

/// Orders certificates by issue date, newest first, undated last.
pub fn sort_certificates(certs: &mut [Certificate]) {
    certs.sort_by(|a, b| match (a.issued_on, b.issued_on) {
        (Some(x), Some(y)) => y.cmp(&x).then(b.id.cmp(&a.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.id.cmp(&a.id),
    });
}
