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


//! Admin password hashes stored as Argon2 PHC strings.
use crate::errors::SecurityError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2,
};

/// Hashes `password` with a fresh random salt into a `$argon2id$...` string.
pub fn hash_password(password: &str) -> Result<String, SecurityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SecurityError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Parses a stored hash, rejecting anything that is not a complete Argon2 PHC string.
pub fn parse_hash(stored: &str) -> Result<PasswordHash<'_>, SecurityError> {
    let hash = PasswordHash::new(stored.trim())
        .map_err(|e| SecurityError::InvalidHash(format!("Not a PHC string: {}", e)))?;
    Algorithm::try_from(hash.algorithm).map_err(|_| {
        SecurityError::InvalidHash(format!("Unsupported algorithm: {}", hash.algorithm))
    })?;
    if hash.hash.is_none() {
        return Err(SecurityError::InvalidHash("missing hash output".to_string()));
    }
    Ok(hash)
}

/// Checks `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match parse_hash(stored) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password("correct horse").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("correct horse ", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("pw", &a));
        assert!(verify_password("pw", &b));
    }

    #[test]
    fn test_surrounding_whitespace_in_stored_hash_is_ignored() {
        let stored = hash_password("abc").unwrap();
        assert!(verify_password("abc", &format!("  {}\n", stored)));
    }

    #[test]
    fn test_malformed_hashes_never_verify() {
        for bad in [
            "",
            "plaintext",
            "0001$abcdef",
            "$argon2id$v=19$m=19456,t=2,p=1",
            "$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA",
        ] {
            assert!(!verify_password("anything", bad), "accepted {:?}", bad);
            assert!(parse_hash(bad).is_err(), "parsed {:?}", bad);
        }
    }
}
