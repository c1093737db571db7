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


//! Error types for security operations

use thiserror::Error;

/// Errors that can occur during security operations
#[derive(Error, Debug, PartialEq)]
pub enum SecurityError {
    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Session token unknown or expired
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Stored password hash could not be parsed
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),

    /// Generic internal error
    #[error("Internal security error: {0}")]
    InternalError(String),
}

impl From<SecurityError> for meridian_core::MeridianError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::AuthenticationError(msg) | SecurityError::InvalidSession(msg) => {
                meridian_core::MeridianError::Unauthorized(msg)
            }
            other => meridian_core::MeridianError::InternalError(format!("Security error: {}", other)),
        }
    }
}
