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


//! Route table.

pub mod admin;
pub mod public;
pub mod search;
pub mod upload;

use crate::auth::require_admin;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use meridian_core::MeridianError;

/// Headroom on top of the image size for multipart boundaries and headers.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Everything mounted under `/api`.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    let admin = Router::new()
        .route("/admin/logout", post(admin::logout))
        .route("/admin/session", get(admin::session))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/messages", get(admin::list_messages))
        .route(
            "/admin/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/admin/products/:id",
            get(admin::get_product)
                .put(admin::update_product)
                .delete(admin::delete_product),
        )
        .route("/admin/news", get(admin::list_news).post(admin::create_news))
        .route(
            "/admin/news/:id",
            get(admin::get_news)
                .put(admin::update_news)
                .delete(admin::delete_news),
        )
        .route(
            "/admin/certificates",
            get(admin::list_certificates).post(admin::create_certificate),
        )
        .route(
            "/admin/certificates/:id",
            get(admin::get_certificate)
                .put(admin::update_certificate)
                .delete(admin::delete_certificate),
        )
        .route(
            "/admin/careers",
            get(admin::list_careers).post(admin::create_career),
        )
        .route(
            "/admin/careers/:id",
            get(admin::get_career)
                .put(admin::update_career)
                .delete(admin::delete_career),
        )
        .route(
            "/admin/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/admin/upload/:file_name", delete(upload::delete_upload))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(public::health))
        .route("/company", get(public::company))
        .route("/products", get(public::list_products))
        .route("/products/:id", get(public::get_product))
        .route("/news", get(public::list_news))
        .route("/news/:id", get(public::get_news))
        .route("/certificates", get(public::list_certificates))
        .route("/careers", get(public::list_careers))
        .route("/careers/:id", get(public::get_career))
        .route("/contact", post(public::submit_contact))
        .route("/search", get(search::search))
        .route("/admin/login", post(admin::login))
        .merge(admin)
        .fallback(unknown_endpoint)
}

async fn unknown_endpoint() -> ApiError {
    MeridianError::NotFound("no such endpoint".to_string()).into()
}
