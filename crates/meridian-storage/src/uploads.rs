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


//! Image uploads written to a local directory and served back under `/uploads/`.

use chrono::Utc;
use meridian_core::MeridianError;
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// URL prefix the API serves the upload directory under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Accepted content types and the extension each is stored with.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/svg+xml", "svg"),
];

/// A file that has been written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredUpload {
    pub file_name: String,
    pub url: String,
    pub size: u64,
    pub content_type: String,
    /// Name the client sent, kept for display only.
    pub original_name: Option<String>,
}

/// Writes uploads under `root`, which the API exposes at [`PUBLIC_PREFIX`].
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalUploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Validates and persists one image.
    ///
    /// The stored extension is derived from `content_type`; the client's file
    /// name never reaches the filesystem.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, MeridianError> {
        let content_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let ext = extension_for(&content_type).ok_or_else(|| {
            MeridianError::UnsupportedMediaType(format!(
                "{} is not an accepted image type",
                if content_type.is_empty() { "missing content type" } else { content_type.as_str() }
            ))
        })?;
        if bytes.is_empty() {
            return Err(MeridianError::validation_error("upload.file", "file is empty"));
        }
        if bytes.len() > self.max_bytes {
            return Err(MeridianError::PayloadTooLarge(format!(
                "file is {} bytes, limit is {}",
                bytes.len(),
                self.max_bytes
            )));
        }

        fs::create_dir_all(&self.root).await?;
        let file_name = generate_file_name(ext);
        let path = self.root.join(&file_name);
        fs::write(&path, bytes).await?;
        info!(file = %file_name, size = bytes.len(), "stored upload");

        Ok(StoredUpload {
            url: format!("{}/{}", PUBLIC_PREFIX, file_name),
            file_name,
            size: bytes.len() as u64,
            content_type,
            original_name: original_name.map(str::to_string),
        })
    }

    /// Removes a previously stored file; returns whether it existed.
    pub async fn delete(&self, file_name: &str) -> Result<bool, MeridianError> {
        if !is_safe_file_name(file_name) {
            return Err(MeridianError::validation_error(
                "upload.file_name",
                "must be a plain file name",
            ));
        }
        match fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(ty, _)| *ty == content_type)
        .map(|(_, ext)| *ext)
}

fn generate_file_name(ext: &str) -> String {
    let mut suffix = [0u8; 4];
    OsRng.fill_bytes(&mut suffix);
    format!("{}-{}.{}", Utc::now().timestamp_millis(), hex::encode(suffix), ext)
}

fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.starts_with('.')
}
