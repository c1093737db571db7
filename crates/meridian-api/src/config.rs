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


//! Runtime configuration read from `MERIDIAN_*` environment variables.

use meridian_core::MeridianError;
use meridian_security::password::parse_hash;
use meridian_security::AdminCredentials;
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 8 * 60 * 60;
pub const MAX_SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Built frontend to serve for every non-API path.
    pub static_dir: Option<PathBuf>,
    pub admin_user: String,
    /// `None` disables admin login entirely.
    pub admin_password_hash: Option<String>,
    pub session_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: None,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            admin_password_hash: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, MeridianError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MeridianError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = Self {
            bind: parse_or(&get, "MERIDIAN_BIND", DEFAULT_BIND)?,
            database_url: get("DATABASE_URL"),
            db_max_connections: parse_or(
                &get,
                "MERIDIAN_DB_MAX_CONNECTIONS",
                &DEFAULT_DB_MAX_CONNECTIONS.to_string(),
            )?,
            upload_dir: get("MERIDIAN_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: parse_or(
                &get,
                "MERIDIAN_MAX_UPLOAD_BYTES",
                &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
            )?,
            static_dir: get("MERIDIAN_STATIC_DIR").map(PathBuf::from),
            admin_user: get("MERIDIAN_ADMIN_USER").unwrap_or_else(|| DEFAULT_ADMIN_USER.to_string()),
            admin_password_hash: get("MERIDIAN_ADMIN_PASSWORD_HASH"),
            session_ttl_secs: parse_or(
                &get,
                "MERIDIAN_SESSION_TTL_SECS",
                &DEFAULT_SESSION_TTL_SECS.to_string(),
            )?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), MeridianError> {
        if self.db_max_connections == 0 {
            return Err(config_error("MERIDIAN_DB_MAX_CONNECTIONS", "must be at least 1"));
        }
        if self.max_upload_bytes == 0 {
            return Err(config_error("MERIDIAN_MAX_UPLOAD_BYTES", "must be at least 1"));
        }
        if !(1..=MAX_SESSION_TTL_SECS).contains(&self.session_ttl_secs) {
            return Err(config_error(
                "MERIDIAN_SESSION_TTL_SECS",
                &format!("must be between 1 and {}", MAX_SESSION_TTL_SECS),
            ));
        }
        if let Some(hash) = &self.admin_password_hash {
            parse_hash(hash).map_err(|e| config_error("MERIDIAN_ADMIN_PASSWORD_HASH", &e.to_string()))?;
        }
        Ok(())
    }

    /// The configured admin account, if a password hash was provided.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        self.admin_password_hash.as_ref().map(|hash| AdminCredentials {
            username: self.admin_user.clone(),
            password_hash: hash.clone(),
        })
    }

    /// Falls back to the default for values [`Config::from_lookup`] would have rejected.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.session_ttl_secs.clamp(1, MAX_SESSION_TTL_SECS))
            .unwrap_or_else(|| chrono::Duration::hours(8))
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: &str) -> Result<T, MeridianError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    let raw = match get(key) {
        Some(value) => {
            debug!("{key} set from environment");
            value
        }
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };
    raw.parse()
        .map_err(|e: T::Err| config_error(key, &format!("invalid value {raw:?}: {e}")))
}

fn config_error(key: &str, message: &str) -> MeridianError {
    MeridianError::ConfigError(format!("{key} {message}"))
}
