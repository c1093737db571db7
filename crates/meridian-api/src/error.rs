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


//! HTTP error responses.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meridian_core::MeridianError;
use meridian_security::SecurityError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] MeridianError),

    /// The request body or query string could not be decoded.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                MeridianError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                MeridianError::NotFound(_) => StatusCode::NOT_FOUND,
                MeridianError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                MeridianError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                MeridianError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "bad_request",
            ApiError::Domain(err) => match err {
                MeridianError::ValidationError { .. } => "validation",
                MeridianError::NotFound(_) => "not_found",
                MeridianError::Unauthorized(_) => "unauthorized",
                MeridianError::PayloadTooLarge(_) => "payload_too_large",
                MeridianError::UnsupportedMediaType(_) => "unsupported_media_type",
                _ => "internal",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<SecurityError> for ApiError {
    fn from(err: SecurityError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        rejected(err.status(), err.body_text())
    }
}

/// Body-limit hits keep their 413; every other extractor failure is a 400.
fn rejected(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::Domain(MeridianError::PayloadTooLarge(text))
    } else {
        ApiError::MalformedRequest(text)
    }
}
