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


#![warn(missing_docs)]

//! Keyword search for the Meridian site.
//!
//! This crate provides:
//! - Conversion of pages, products, news and careers into search entries
//! - A weighted substring/keyword scorer
//! - Ranking with a result cap and a static-only fallback

#[allow(missing_docs)]
pub mod engine;
#[allow(missing_docs)]
pub mod entry;
/// The fixed site pages as search entries.
pub mod index;
#[allow(missing_docs)]
pub mod scorer;

pub use engine::{perform_search, search_site, simple_search, RemoteCollections, SearchHit, SearchResults};
pub use entry::{EntryKind, SearchEntry};
