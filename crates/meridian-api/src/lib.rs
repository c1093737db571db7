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


//! HTTP server for the Meridian Industrial website.
//!
//! [`app`] builds the router; [`serve`] wires it to a store, binds and runs
//! until Ctrl-C or SIGTERM.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    Router,
};
use meridian_core::{ContentStore, InMemoryContentStore, MeridianError};
use meridian_security::SessionRegistry;
use meridian_storage::{uploads::PUBLIC_PREFIX, MySqlContentStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

pub const DEFAULT_LOG_FILTER: &str = "meridian_api=info,tower_http=info";

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Installs the global subscriber. `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).init();
}

/// Builds the full router: `/api`, `/uploads` and, if configured, the frontend.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let router = Router::new()
        .nest("/api", routes::api_router(&state))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&config.upload_dir));

    let router = match &config.static_dir {
        // Client-side routes resolve to index.html.
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Picks MySQL when a database URL is configured, otherwise the in-memory store.
pub async fn open_store(
    config: &Config,
    force_memory: bool,
) -> Result<Arc<dyn ContentStore>, MeridianError> {
    match (&config.database_url, force_memory) {
        (Some(url), false) => {
            info!("connecting to MySQL");
            let store = MySqlContentStore::connect(url, config.db_max_connections).await?;
            store.init_schema().await?;
            Ok(Arc::new(store))
        }
        _ => {
            warn!("using in-memory content store; changes are lost on restart");
            Ok(Arc::new(InMemoryContentStore::new()))
        }
    }
}

/// Runs the server until a shutdown signal arrives.
pub async fn serve(config: Config, force_memory: bool) -> anyhow::Result<()> {
    let store = open_store(&config, force_memory).await?;
    let bind = config.bind;
    let state = AppState::new(store, config);
    if !state.sessions.login_enabled() {
        warn!("MERIDIAN_ADMIN_PASSWORD_HASH not set, admin login is disabled");
    }
    spawn_session_sweeper(state.sessions.clone());

    info!("Binding to {bind}");
    let listener = TcpListener::bind(bind).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn spawn_session_sweeper(sessions: SessionRegistry) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                debug!(purged, "expired admin sessions removed");
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn test_app(config: Config) -> Router {
        app(AppState::new(Arc::new(InMemoryContentStore::new()), config))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get(test_app(Config::default()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body_json, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let (status, body) = get(test_app(Config::default()), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body_json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_spa_fallback_serves_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>meridian</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let config = Config {
            static_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let (status, body) = get(test_app(config.clone()), "/products/12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<html>meridian</html>");

        let (status, body) = get(test_app(config.clone()), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"console.log(1)");

        // API misses stay JSON even with a frontend mounted.
        let (status, _) = get(test_app(config), "/api/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_uploaded_files_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"png-bytes").unwrap();
        let config = Config {
            upload_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let (status, body) = get(test_app(config), "/uploads/logo.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"png-bytes");
    }

    #[tokio::test]
    async fn test_open_store_defaults_to_memory() {
        let config = Config {
            database_url: Some("mysql://unused".into()),
            ..Config::default()
        };
        let store = open_store(&config, true).await.unwrap();
        assert_eq!(store.dashboard_stats().await.unwrap().products, 0);
    }
}
