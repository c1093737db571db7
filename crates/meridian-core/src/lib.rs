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

#![deny(unsafe_code)]
#![allow(missing_docs)] // Documentation is incomplete; re-enable once ready

//! Core Meridian types, validation and the content storage contract.

pub mod career;
pub mod certificate;
pub mod contact;
pub mod errors;
pub mod news;
pub mod product;
/// Company profile and the fixed pages of the site.
pub mod site;
pub mod store;
pub mod types;
pub mod validation;

pub use errors::MeridianError;
pub use store::{ContentStore, InMemoryContentStore};
