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


//! Read-only endpoints behind the public site.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use meridian_core::career::Career;
use meridian_core::certificate::Certificate;
use meridian_core::contact::ContactSubmission;
use meridian_core::news::NewsPost;
use meridian_core::product::Product;
use meridian_core::site::{CompanyProfile, COMPANY_PROFILE};
use meridian_core::types::{CareerFilter, CareerId, NewsFilter, NewsId, ProductFilter, ProductId};
use meridian_core::MeridianError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Upper bound for `?limit=` on the news list.
pub const MAX_NEWS_LIMIT: u32 = 100;

#[derive(Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus { status: "ok" }))
}

pub async fn company() -> Json<&'static CompanyProfile> {
    Json(&*COMPANY_PROFILE)
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;
    let filter = ProductFilter {
        category: non_blank(query.category),
        featured_only: query.featured.unwrap_or(false),
    };
    Ok(Json(state.store.list_products(&filter).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| MeridianError::not_found("product", id))?;
    Ok(Json(product))
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
}

pub async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<Vec<NewsPost>>, ApiError> {
    let Query(query) = query?;
    let filter = NewsFilter {
        category: non_blank(query.category),
        limit: query.limit.map(|l| l.clamp(1, MAX_NEWS_LIMIT)),
        ..NewsFilter::published()
    };
    Ok(Json(state.store.list_news(&filter).await?))
}

/// Drafts are indistinguishable from missing posts.
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsPost>, ApiError> {
    let post = state
        .store
        .get_news(id)
        .await?
        .filter(|p| p.published)
        .ok_or_else(|| MeridianError::not_found("news post", id))?;
    Ok(Json(post))
}

pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    Ok(Json(state.store.list_certificates().await?))
}

pub async fn list_careers(State(state): State<AppState>) -> Result<Json<Vec<Career>>, ApiError> {
    let filter = CareerFilter { active_only: true };
    Ok(Json(state.store.list_careers(&filter).await?))
}

pub async fn get_career(
    State(state): State<AppState>,
    Path(id): Path<CareerId>,
) -> Result<Json<Career>, ApiError> {
    let career = state
        .store
        .get_career(id)
        .await?
        .filter(|c| c.active)
        .ok_or_else(|| MeridianError::not_found("career", id))?;
    Ok(Json(career))
}

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: i64,
    pub message: &'static str,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactReceipt>), ApiError> {
    let Json(submission) = payload?;
    let submission = submission.normalized();
    submission.validate()?;
    let stored = state.store.create_contact_message(submission).await?;
    info!(id = stored.id, subject = %stored.subject, "contact message received");
    Ok((
        StatusCode::CREATED,
        Json(ContactReceipt {
            id: stored.id,
            message: "Thank you for contacting Meridian Industrial. We will reply shortly.",
        }),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
