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


//! Admin sessions backed by opaque bearer tokens.
//!
//! Sessions live in process memory only; a restart logs every admin out.

use crate::errors::SecurityError;
use crate::password::verify_password;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{info, warn};

const TOKEN_LENGTH_BYTES: usize = 32;
const LOGIN_FAILED: &str = "invalid username or password";

/// The single admin account, as configured.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Login name.
    pub username: String,
    /// Output of [`crate::password::hash_password`].
    pub password_hash: String,
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSession {
    /// Bearer token presented on every admin request.
    pub token: String,
    /// Who logged in.
    pub username: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Issues, validates and revokes admin sessions.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    credentials: Option<AdminCredentials>,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl SessionRegistry {
    /// Creates a registry. With `credentials == None` every login fails.
    pub fn new(credentials: Option<AdminCredentials>, ttl: Duration) -> Self {
        Self {
            credentials,
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Whether an admin account is configured at all.
    pub fn login_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Checks the credentials and opens a session.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminSession, SecurityError> {
        let Some(creds) = &self.credentials else {
            warn!("admin login attempted but no admin account is configured");
            return Err(SecurityError::AuthenticationError(LOGIN_FAILED.to_string()));
        };
        // Evaluate both checks so timing does not reveal which one failed.
        let user_ok: bool = username.as_bytes().ct_eq(creds.username.as_bytes()).into();
        let pass_ok = verify_password(password, &creds.password_hash);
        if !(user_ok && pass_ok) {
            warn!(username, "admin login rejected");
            return Err(SecurityError::AuthenticationError(LOGIN_FAILED.to_string()));
        }

        let expires_at = Utc::now().checked_add_signed(self.ttl).ok_or_else(|| {
            SecurityError::InternalError("session expiry is out of range".to_string())
        })?;
        let session = AdminSession {
            token: new_token(),
            username: creds.username.clone(),
            expires_at,
        };
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        info!(username = %session.username, "admin logged in");
        Ok(session)
    }

    /// Returns the live session for `token`, evicting it if it has expired.
    pub async fn validate(&self, token: &str) -> Result<AdminSession, SecurityError> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(s) if !s.is_expired_at(now) => return Ok(s.clone()),
                Some(_) => {}
                None => return Err(SecurityError::InvalidSession("unknown token".to_string())),
            }
        }
        self.sessions.write().await.remove(token);
        Err(SecurityError::InvalidSession("session expired".to_string()))
    }

    /// Revokes `token`; returns whether it existed.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_LENGTH_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;

    fn registry(ttl: Duration) -> SessionRegistry {
        SessionRegistry::new(
            Some(AdminCredentials {
                username: "admin".into(),
                password_hash: hash_password("s3cret").unwrap(),
            }),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_login_and_validate() {
        let reg = registry(Duration::hours(1));
        let session = reg.login("admin", "s3cret").await.unwrap();
        assert_eq!(session.token.len(), TOKEN_LENGTH_BYTES * 2);
        assert_eq!(reg.validate(&session.token).await.unwrap(), session);
    }

    #[tokio::test]
    async fn test_wrong_credentials_share_one_message() {
        let reg = registry(Duration::hours(1));
        let bad_pass = reg.login("admin", "nope").await.unwrap_err();
        let bad_user = reg.login("root", "s3cret").await.unwrap_err();
        assert_eq!(bad_pass, bad_user);
        assert_eq!(reg.len().await, 0);
    }

    #[tokio::test]
    async fn test_no_credentials_disables_login() {
        let reg = SessionRegistry::new(None, Duration::hours(1));
        assert!(!reg.login_enabled());
        assert!(reg.login("admin", "").await.is_err());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_evicted() {
        let reg = registry(Duration::zero());
        let session = reg.login("admin", "s3cret").await.unwrap();
        match reg.validate(&session.token).await {
            Err(SecurityError::InvalidSession(msg)) => assert!(msg.contains("expired")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(reg.len().await, 0);
    }

    #[tokio::test]
    async fn test_logout_revokes() {
        let reg = registry(Duration::hours(1));
        let session = reg.login("admin", "s3cret").await.unwrap();
        assert!(reg.logout(&session.token).await);
        assert!(!reg.logout(&session.token).await);
        assert!(reg.validate(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_ttl_fails_login_without_panicking() {
        let reg = registry(Duration::days(365 * 400_000));
        match reg.login("admin", "s3cret").await {
            Err(SecurityError::InternalError(msg)) => assert!(msg.contains("out of range")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(reg.len().await, 0);
    }

    #[test]
    fn test_purge_expired_counts() {
        tokio_test::block_on(async {
            let reg = registry(Duration::zero());
            reg.login("admin", "s3cret").await.unwrap();
            reg.login("admin", "s3cret").await.unwrap();
            assert_eq!(reg.purge_expired().await, 2);
            assert_eq!(reg.len().await, 0);
        });
    }
}
