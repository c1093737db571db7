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


use crate::config::Config;
use meridian_core::ContentStore;
use meridian_security::SessionRegistry;
use meridian_storage::LocalUploadStore;
use std::sync::Arc;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub sessions: SessionRegistry,
    pub uploads: LocalUploadStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: Config) -> Self {
        Self {
            sessions: SessionRegistry::new(config.admin_credentials(), config.session_ttl()),
            uploads: LocalUploadStore::new(config.upload_dir.clone(), config.max_upload_bytes),
            store,
            config: Arc::new(config),
        }
    }
}
