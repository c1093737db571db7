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


//! MySQL-based implementation of the `ContentStore` trait using SQLx and MySqlPool.

use crate::schema::ALL_TABLES;
use async_trait::async_trait;
use chrono::Utc;
use meridian_core::career::{Career, CareerInput};
use meridian_core::certificate::{Certificate, CertificateInput};
use meridian_core::contact::{ContactMessage, ContactSubmission};
use meridian_core::news::{NewsPost, NewsPostInput};
use meridian_core::product::{Product, ProductInput};
use meridian_core::store::ContentStore;
use meridian_core::types::{
    CareerFilter, CareerId, CertificateId, DashboardStats, NewsFilter, NewsId, ProductFilter,
    ProductId,
};
use meridian_core::MeridianError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

const PRODUCT_COLUMNS: &str =
    "id, name, category, description, features, image_url, featured, created_at, updated_at";
const NEWS_COLUMNS: &str = "id, title, excerpt, content, category, author, image_url, published, \
                            published_at, created_at, updated_at";
const CERTIFICATE_COLUMNS: &str =
    "id, title, issuer, description, image_url, issued_on, expires_on, created_at";
const CAREER_COLUMNS: &str = "id, title, department, location, employment_type, description, \
                              requirements, active, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, name, email, phone, company, subject, message, created_at";

fn db_err(op: &'static str) -> impl FnOnce(sqlx::Error) -> MeridianError {
    move |e| MeridianError::StorageError(format!("DB {} error: {}", op, e))
}

/// MySQL-backed ContentStore.
#[derive(Clone, Debug)]
pub struct MySqlContentStore {
    /// Connection pool to MySQL.
    pool: MySqlPool,
}

impl MySqlContentStore {
    /// Creates a new MySqlContentStore with the given MySqlPool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, MeridianError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
            .map_err(db_err("connect"))?;
        info!(max_connections, "connected to MySQL");
        Ok(Self::new(pool))
    }

    /// Creates any missing tables.
    pub async fn init_schema(&self) -> Result<(), MeridianError> {
        for (table, ddl) in ALL_TABLES {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(db_err("init_schema"))?;
            debug!(table, "ensured table");
        }
        Ok(())
    }

    async fn count(&self, sql: &str, op: &'static str) -> Result<i64, MeridianError> {
        let row = sqlx::query(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err(op))?;
        row.try_get::<i64, _>(0).map_err(db_err(op))
    }
}

#[async_trait]
impl ContentStore for MySqlContentStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, MeridianError> {
        let sql = format!(
            "SELECT {} FROM products \
             WHERE (? IS NULL OR LOWER(category) = LOWER(?)) AND (? = FALSE OR featured = TRUE) \
             ORDER BY featured DESC, created_at DESC, id DESC",
            PRODUCT_COLUMNS
        );
        let category = filter.category.as_deref().map(str::trim);
        sqlx::query_as::<_, Product>(&sql)
            .bind(category)
            .bind(category)
            .bind(filter.featured_only)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("list_products"))
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, MeridianError> {
        let sql = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("get_product"))
    }

    async fn create_product(&self, input: ProductInput) -> Result<Product, MeridianError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category, description, features, image_url, featured, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(&input.features)
        .bind(&input.image_url)
        .bind(input.featured)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err("create_product"))?;
        let id = result.last_insert_id() as ProductId;
        debug!(id, "created product");
        self.get_product(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("product", id))
    }

    async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, MeridianError> {
        sqlx::query(
            r#"
            UPDATE products SET
                name = ?, category = ?, description = ?, features = ?, image_url = ?,
                featured = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(&input.features)
        .bind(&input.image_url)
        .bind(input.featured)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err("update_product"))?;
        // rows_affected is 0 for an unchanged row on MySQL, so presence comes from the re-read.
        self.get_product(id).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, MeridianError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("delete_product"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsPost>, MeridianError> {
        let limit_clause = if filter.limit.is_some() { " LIMIT ?" } else { "" };
        let sql = format!(
            "SELECT {} FROM news_posts \
             WHERE (? IS NULL OR LOWER(category) = LOWER(?)) AND (? = FALSE OR published = TRUE) \
             ORDER BY COALESCE(published_at, created_at) DESC, id DESC{}",
            NEWS_COLUMNS, limit_clause
        );
        let category = filter.category.as_deref().map(str::trim);
        let mut query = sqlx::query_as::<_, NewsPost>(&sql)
            .bind(category)
            .bind(category)
            .bind(filter.published_only);
        if let Some(limit) = filter.limit {
            query = query.bind(limit);
        }
        query
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("list_news"))
    }

    async fn get_news(&self, id: NewsId) -> Result<Option<NewsPost>, MeridianError> {
        let sql = format!("SELECT {} FROM news_posts WHERE id = ?", NEWS_COLUMNS);
        sqlx::query_as::<_, NewsPost>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("get_news"))
    }

    async fn create_news(&self, input: NewsPostInput) -> Result<NewsPost, MeridianError> {
        let now = Utc::now();
        let published_at = input.resolve_published_at(None, now);
        let result = sqlx::query(
            r#"
            INSERT INTO news_posts (title, excerpt, content, category, author, image_url, published, published_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.author)
        .bind(&input.image_url)
        .bind(input.published)
        .bind(published_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err("create_news"))?;
        let id = result.last_insert_id() as NewsId;
        debug!(id, published = input.published, "created news post");
        self.get_news(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("news post", id))
    }

    async fn update_news(
        &self,
        id: NewsId,
        input: NewsPostInput,
    ) -> Result<Option<NewsPost>, MeridianError> {
        let mut tx = self.pool.begin().await.map_err(db_err("update_news"))?;
        let previous = sqlx::query("SELECT published_at FROM news_posts WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("update_news"))?;
        let Some(previous) = previous else {
            return Ok(None);
        };
        let previous_published_at = previous
            .try_get::<Option<chrono::DateTime<Utc>>, _>("published_at")
            .map_err(db_err("update_news"))?;

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE news_posts SET
                title = ?, excerpt = ?, content = ?, category = ?, author = ?, image_url = ?,
                published = ?, published_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.author)
        .bind(&input.image_url)
        .bind(input.published)
        .bind(input.resolve_published_at(previous_published_at, now))
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("update_news"))?;
        tx.commit().await.map_err(db_err("update_news"))?;

        self.get_news(id).await
    }

    async fn delete_news(&self, id: NewsId) -> Result<bool, MeridianError> {
        let result = sqlx::query("DELETE FROM news_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("delete_news"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_certificates(&self) -> Result<Vec<Certificate>, MeridianError> {
        let sql = format!(
            "SELECT {} FROM certificates ORDER BY issued_on IS NULL, issued_on DESC, id DESC",
            CERTIFICATE_COLUMNS
        );
        sqlx::query_as::<_, Certificate>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("list_certificates"))
    }

    async fn get_certificate(
        &self,
        id: CertificateId,
    ) -> Result<Option<Certificate>, MeridianError> {
        let sql = format!("SELECT {} FROM certificates WHERE id = ?", CERTIFICATE_COLUMNS);
        sqlx::query_as::<_, Certificate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("get_certificate"))
    }

    async fn create_certificate(
        &self,
        input: CertificateInput,
    ) -> Result<Certificate, MeridianError> {
        let result = sqlx::query(
            r#"
            INSERT INTO certificates (title, issuer, description, image_url, issued_on, expires_on, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.issuer)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.issued_on)
        .bind(input.expires_on)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err("create_certificate"))?;
        let id = result.last_insert_id() as CertificateId;
        self.get_certificate(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("certificate", id))
    }

    async fn update_certificate(
        &self,
        id: CertificateId,
        input: CertificateInput,
    ) -> Result<Option<Certificate>, MeridianError> {
        sqlx::query(
            r#"
            UPDATE certificates SET
                title = ?, issuer = ?, description = ?, image_url = ?, issued_on = ?, expires_on = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.issuer)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.issued_on)
        .bind(input.expires_on)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err("update_certificate"))?;
        self.get_certificate(id).await
    }

    async fn delete_certificate(&self, id: CertificateId) -> Result<bool, MeridianError> {
        let result = sqlx::query("DELETE FROM certificates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("delete_certificate"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_careers(&self, filter: &CareerFilter) -> Result<Vec<Career>, MeridianError> {
        let sql = format!(
            "SELECT {} FROM careers WHERE (? = FALSE OR active = TRUE) \
             ORDER BY created_at DESC, id DESC",
            CAREER_COLUMNS
        );
        sqlx::query_as::<_, Career>(&sql)
            .bind(filter.active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("list_careers"))
    }

    async fn get_career(&self, id: CareerId) -> Result<Option<Career>, MeridianError> {
        let sql = format!("SELECT {} FROM careers WHERE id = ?", CAREER_COLUMNS);
        sqlx::query_as::<_, Career>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("get_career"))
    }

    async fn create_career(&self, input: CareerInput) -> Result<Career, MeridianError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO careers (title, department, location, employment_type, description, requirements, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.department)
        .bind(&input.location)
        .bind(&input.employment_type)
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(input.active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err("create_career"))?;
        let id = result.last_insert_id() as CareerId;
        self.get_career(id)
            .await?
            .ok_or_else(|| MeridianError::not_found("career", id))
    }

    async fn update_career(
        &self,
        id: CareerId,
        input: CareerInput,
    ) -> Result<Option<Career>, MeridianError> {
        sqlx::query(
            r#"
            UPDATE careers SET
                title = ?, department = ?, location = ?, employment_type = ?, description = ?,
                requirements = ?, active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.title)
        .bind(&input.department)
        .bind(&input.location)
        .bind(&input.employment_type)
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(input.active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_err("update_career"))?;
        self.get_career(id).await
    }

    async fn delete_career(&self, id: CareerId) -> Result<bool, MeridianError> {
        let result = sqlx::query("DELETE FROM careers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("delete_career"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_contact_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, MeridianError> {
        let result = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, phone, company, subject, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.company)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err("create_contact_message"))?;
        let id = result.last_insert_id() as i64;
        let sql = format!("SELECT {} FROM contact_messages WHERE id = ?", MESSAGE_COLUMNS);
        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("create_contact_message"))
    }

    async fn list_contact_messages(
        &self,
        limit: u32,
    ) -> Result<Vec<ContactMessage>, MeridianError> {
        let sql = format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC, id DESC LIMIT ?",
            MESSAGE_COLUMNS
        );
        sqlx::query_as::<_, ContactMessage>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("list_contact_messages"))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, MeridianError> {
        Ok(DashboardStats {
            products: self.count("SELECT COUNT(*) FROM products", "stats").await?,
            featured_products: self
                .count("SELECT COUNT(*) FROM products WHERE featured = TRUE", "stats")
                .await?,
            news_posts: self.count("SELECT COUNT(*) FROM news_posts", "stats").await?,
            published_news_posts: self
                .count("SELECT COUNT(*) FROM news_posts WHERE published = TRUE", "stats")
                .await?,
            certificates: self.count("SELECT COUNT(*) FROM certificates", "stats").await?,
            careers: self.count("SELECT COUNT(*) FROM careers", "stats").await?,
            active_careers: self
                .count("SELECT COUNT(*) FROM careers WHERE active = TRUE", "stats")
                .await?,
            contact_messages: self
                .count("SELECT COUNT(*) FROM contact_messages", "stats")
                .await?,
        })
    }
}
