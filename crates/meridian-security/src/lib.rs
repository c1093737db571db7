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

//! Admin authentication for the Meridian dashboard.
//!
//! This crate provides:
//! - Salted password hashing and verification
//! - Bearer-token sessions with expiry

pub mod errors;
pub mod password;
pub mod session;

pub use errors::SecurityError;
pub use password::{hash_password, verify_password};
pub use session::{AdminCredentials, AdminSession, SessionRegistry};
