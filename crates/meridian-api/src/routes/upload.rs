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


use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use meridian_core::MeridianError;
use meridian_storage::StoredUpload;
use tracing::{debug, info};

/// Form fields accepted as the image payload.
const FILE_FIELDS: &[&str] = &["file", "image"];

/// Stores the first `file` or `image` part of a multipart form.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<StoredUpload>), ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            debug!(field = %name, "skipping multipart field");
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let stored = state
            .uploads
            .save(original_name.as_deref(), &content_type, &bytes)
            .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }
    Err(MeridianError::validation_error("upload", "expected a `file` or `image` field").into())
}

/// Removes a stored image by the `file_name` returned from the upload.
pub async fn delete_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.uploads.delete(&file_name).await? {
        return Err(MeridianError::NotFound(format!("upload {}", file_name)).into());
    }
    info!(file = %file_name, "upload deleted");
    Ok(StatusCode::NO_CONTENT)
}
