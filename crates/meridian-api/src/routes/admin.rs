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


//! Dashboard endpoints. Everything except [`login`] sits behind
//! [`crate::auth::require_admin`].

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use meridian_core::career::{Career, CareerInput};
use meridian_core::certificate::{Certificate, CertificateInput};
use meridian_core::contact::ContactMessage;
use meridian_core::news::{NewsPost, NewsPostInput};
use meridian_core::product::{Product, ProductInput};
use meridian_core::types::{
    CareerFilter, CareerId, CertificateId, DashboardStats, NewsFilter, NewsId, ProductFilter,
    ProductId,
};
use meridian_core::MeridianError;
use meridian_security::AdminSession;
use serde::Deserialize;
use tracing::info;

pub const DEFAULT_MESSAGE_LIMIT: u32 = 50;
pub const MAX_MESSAGE_LIMIT: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AdminSession>, ApiError> {
    let Json(request) = payload?;
    let session = state
        .sessions
        .login(request.username.trim(), &request.password)
        .await?;
    Ok(Json(session))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> StatusCode {
    state.sessions.logout(&session.token).await;
    info!(username = %session.username, "admin logged out");
    StatusCode::NO_CONTENT
}

pub async fn session(Extension(session): Extension<AdminSession>) -> Json<AdminSession> {
    Json(session)
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.store.dashboard_stats().await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<u32>,
}

pub async fn list_messages(
    State(state): State<AppState>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
        .clamp(1, MAX_MESSAGE_LIMIT);
    Ok(Json(state.store.list_contact_messages(limit).await?))
}

fn deleted(found: bool, entity: &str, id: i64) -> Result<StatusCode, ApiError> {
    if found {
        info!(entity, id, "deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(MeridianError::not_found(entity, id).into())
    }
}

// Products

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products(&ProductFilter::default()).await?))
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

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let product = state.store.create_product(input).await?;
    info!(id = product.id, name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let product = state
        .store
        .update_product(id, input)
        .await?
        .ok_or_else(|| MeridianError::not_found("product", id))?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    deleted(state.store.delete_product(id).await?, "product", id)
}

// News

/// Drafts included.
pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsPost>>, ApiError> {
    Ok(Json(state.store.list_news(&NewsFilter::default()).await?))
}

pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsPost>, ApiError> {
    let post = state
        .store
        .get_news(id)
        .await?
        .ok_or_else(|| MeridianError::not_found("news post", id))?;
    Ok(Json(post))
}

pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<NewsPostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsPost>), ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let post = state.store.create_news(input).await?;
    info!(id = post.id, published = post.published, "news post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
    payload: Result<Json<NewsPostInput>, JsonRejection>,
) -> Result<Json<NewsPost>, ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let post = state
        .store
        .update_news(id, input)
        .await?
        .ok_or_else(|| MeridianError::not_found("news post", id))?;
    Ok(Json(post))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<StatusCode, ApiError> {
    deleted(state.store.delete_news(id).await?, "news post", id)
}

// Certificates

pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    Ok(Json(state.store.list_certificates().await?))
}

pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<CertificateId>,
) -> Result<Json<Certificate>, ApiError> {
    let certificate = state
        .store
        .get_certificate(id)
        .await?
        .ok_or_else(|| MeridianError::not_found("certificate", id))?;
    Ok(Json(certificate))
}

pub async fn create_certificate(
    State(state): State<AppState>,
    payload: Result<Json<CertificateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Certificate>), ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let certificate = state.store.create_certificate(input).await?;
    info!(id = certificate.id, "certificate created");
    Ok((StatusCode::CREATED, Json(certificate)))
}

pub async fn update_certificate(
    State(state): State<AppState>,
    Path(id): Path<CertificateId>,
    payload: Result<Json<CertificateInput>, JsonRejection>,
) -> Result<Json<Certificate>, ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let certificate = state
        .store
        .update_certificate(id, input)
        .await?
        .ok_or_else(|| MeridianError::not_found("certificate", id))?;
    Ok(Json(certificate))
}

pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<CertificateId>,
) -> Result<StatusCode, ApiError> {
    deleted(state.store.delete_certificate(id).await?, "certificate", id)
}

// Careers

/// Inactive openings included.
pub async fn list_careers(State(state): State<AppState>) -> Result<Json<Vec<Career>>, ApiError> {
    Ok(Json(state.store.list_careers(&CareerFilter::default()).await?))
}

pub async fn get_career(
    State(state): State<AppState>,
    Path(id): Path<CareerId>,
) -> Result<Json<Career>, ApiError> {
    let career = state
        .store
        .get_career(id)
        .await?
        .ok_or_else(|| MeridianError::not_found("career", id))?;
    Ok(Json(career))
}

pub async fn create_career(
    State(state): State<AppState>,
    payload: Result<Json<CareerInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Career>), ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let career = state.store.create_career(input).await?;
    info!(id = career.id, title = %career.title, "career created");
    Ok((StatusCode::CREATED, Json(career)))
}

pub async fn update_career(
    State(state): State<AppState>,
    Path(id): Path<CareerId>,
    payload: Result<Json<CareerInput>, JsonRejection>,
) -> Result<Json<Career>, ApiError> {
    let Json(input) = payload?;
    let input = input.normalized();
    input.validate()?;
    let career = state
        .store
        .update_career(id, input)
        .await?
        .ok_or_else(|| MeridianError::not_found("career", id))?;
    Ok(Json(career))
}

pub async fn delete_career(
    State(state): State<AppState>,
    Path(id): Path<CareerId>,
) -> Result<StatusCode, ApiError> {
    deleted(state.store.delete_career(id).await?, "career", id)
}
