// Copyright 2024 Meridian Industrial
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Search keeps answering when the content store misbehaves.

use async_trait::async_trait;
use meridian_core::career::{Career, CareerInput};
use meridian_core::certificate::{Certificate, CertificateInput};
use meridian_core::contact::{ContactMessage, ContactSubmission};
use meridian_core::news::{NewsPost, NewsPostInput};
use meridian_core::product::{Product, ProductInput};
use meridian_core::types::{
    CareerFilter, CareerId, CertificateId, DashboardStats, NewsFilter, NewsId, ProductFilter,
    ProductId,
};
use meridian_core::{ContentStore, InMemoryContentStore, MeridianError};
use meridian_search::engine::gather_collections;
use meridian_search::{search_site, simple_search, EntryKind};

/// Delegates to an in-memory store but fails the chosen listings.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryContentStore,
    fail_news: bool,
    fail_careers: bool,
    fail_products: bool,
}

impl FlakyStore {
    fn all_failing() -> Self {
        Self {
            fail_news: true,
            fail_careers: true,
            fail_products: true,
            ..Default::default()
        }
    }
}

fn outage() -> MeridianError {
    MeridianError::StorageError("connection refused".into())
}

#[async_trait]
impl ContentStore for FlakyStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, MeridianError> {
        if self.fail_products {
            return Err(outage());
        }
        self.inner.list_products(filter).await
    }
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, MeridianError> {
        self.inner.get_product(id).await
    }
    async fn create_product(&self, input: ProductInput) -> Result<Product, MeridianError> {
        self.inner.create_product(input).await
    }
    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, MeridianError> {
        self.inner.update_product(id, input).await
    }
    async fn delete_product(&self, id: ProductId) -> Result<bool, MeridianError> {
        self.inner.delete_product(id).await
    }

    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsPost>, MeridianError> {
        if self.fail_news {
            return Err(outage());
        }
        self.inner.list_news(filter).await
    }
    async fn get_news(&self, id: NewsId) -> Result<Option<NewsPost>, MeridianError> {
        self.inner.get_news(id).await
    }
    async fn create_news(&self, input: NewsPostInput) -> Result<NewsPost, MeridianError> {
        self.inner.create_news(input).await
    }
    async fn update_news(
        &self,
        id: NewsId,
        input: NewsPostInput,
    ) -> Result<Option<NewsPost>, MeridianError> {
        self.inner.update_news(id, input).await
    }
    async fn delete_news(&self, id: NewsId) -> Result<bool, MeridianError> {
        self.inner.delete_news(id).await
    }

    async fn list_certificates(&self) -> Result<Vec<Certificate>, MeridianError> {
        self.inner.list_certificates().await
    }
    async fn get_certificate(
        &self,
        id: CertificateId,
    ) -> Result<Option<Certificate>, MeridianError> {
        self.inner.get_certificate(id).await
    }
    async fn create_certificate(
        &self,
        input: CertificateInput,
    ) -> Result<Certificate, MeridianError> {
        self.inner.create_certificate(input).await
    }
    async fn update_certificate(
        &self,
        id: CertificateId,
        input: CertificateInput,
    ) -> Result<Option<Certificate>, MeridianError> {
        self.inner.update_certificate(id, input).await
    }
    async fn delete_certificate(&self, id: CertificateId) -> Result<bool, MeridianError> {
        self.inner.delete_certificate(id).await
    }

    async fn list_careers(&self, filter: &CareerFilter) -> Result<Vec<Career>, MeridianError> {
        if self.fail_careers {
            return Err(outage());
        }
        self.inner.list_careers(filter).await
    }
    async fn get_career(&self, id: CareerId) -> Result<Option<Career>, MeridianError> {
        self.inner.get_career(id).await
    }
    async fn create_career(&self, input: CareerInput) -> Result<Career, MeridianError> {
        self.inner.create_career(input).await
    }
    async fn update_career(
        &self,
        id: CareerId,
        input: CareerInput,
    ) -> Result<Option<Career>, MeridianError> {
        self.inner.update_career(id, input).await
    }
    async fn delete_career(&self, id: CareerId) -> Result<bool, MeridianError> {
        self.inner.delete_career(id).await
    }

    async fn create_contact_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, MeridianError> {
        self.inner.create_contact_message(submission).await
    }
    async fn list_contact_messages(
        &self,
        limit: u32,
    ) -> Result<Vec<ContactMessage>, MeridianError> {
        self.inner.list_contact_messages(limit).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, MeridianError> {
        self.inner.dashboard_stats().await
    }
}

async fn seed(store: &FlakyStore) {
    store
        .inner
        .create_product(ProductInput {
            name: "Turbine Flow Meter TF-40".into(),
            category: "Meters".into(),
            description: "Inline turbine meter".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .inner
        .create_career(CareerInput {
            title: "Turbine Service Technician".into(),
            department: "Service".into(),
            location: "Rotterdam".into(),
            employment_type: "Full-time".into(),
            description: "Field maintenance".into(),
            requirements: None,
            active: true,
        })
        .await
        .unwrap();
    store
        .inner
        .create_news(NewsPostInput {
            title: "Turbine line expanded".into(),
            excerpt: "New sizes".into(),
            content: "Three new bore sizes".into(),
            category: "Products".into(),
            published: true,
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn failing_collection_is_skipped() {
    let store = FlakyStore {
        fail_news: true,
        ..Default::default()
    };
    seed(&store).await;

    let collections = gather_collections(&store).await;
    assert!(collections.news.is_none());
    assert_eq!(collections.careers.as_ref().map(Vec::len), Some(1));
    assert_eq!(collections.products.as_ref().map(Vec::len), Some(1));
    assert!(!collections.is_unavailable());

    let results = search_site(&store, "turbine", None).await;
    let kinds: Vec<_> = results.results.iter().map(|h| h.kind).collect();
    assert!(kinds.contains(&EntryKind::Product));
    assert!(kinds.contains(&EntryKind::Career));
    assert!(!kinds.contains(&EntryKind::News));
}

#[tokio::test]
async fn total_outage_falls_back_to_static_index() {
    let store = FlakyStore::all_failing();
    seed(&store).await;

    assert!(gather_collections(&store).await.is_unavailable());
    for query in ["turbine", "quality", "contact", "pumps"] {
        assert_eq!(
            search_site(&store, query, Some(5)).await,
            simple_search(query, Some(5)),
            "query {:?}",
            query
        );
    }
}
