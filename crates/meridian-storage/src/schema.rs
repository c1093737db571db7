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


//! Table definitions, applied idempotently at startup.
//!
//! Instants are `DATETIME(6)` holding UTC. `TIMESTAMP` stops at 2038.

pub const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    category VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    features TEXT NULL,
    image_url VARCHAR(1024) NULL,
    featured BOOLEAN NOT NULL DEFAULT FALSE,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    INDEX idx_products_category (category)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_NEWS_POSTS: &str = r#"
CREATE TABLE IF NOT EXISTS news_posts (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    excerpt VARCHAR(500) NOT NULL DEFAULT '',
    content MEDIUMTEXT NOT NULL,
    category VARCHAR(100) NOT NULL,
    author VARCHAR(100) NULL,
    image_url VARCHAR(1024) NULL,
    published BOOLEAN NOT NULL DEFAULT FALSE,
    published_at DATETIME(6) NULL,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    INDEX idx_news_published (published, published_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_CERTIFICATES: &str = r#"
CREATE TABLE IF NOT EXISTS certificates (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    issuer VARCHAR(200) NOT NULL,
    description TEXT NULL,
    image_url VARCHAR(1024) NULL,
    issued_on DATE NULL,
    expires_on DATE NULL,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_CAREERS: &str = r#"
CREATE TABLE IF NOT EXISTS careers (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    department VARCHAR(100) NOT NULL,
    location VARCHAR(100) NOT NULL,
    employment_type VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    requirements TEXT NULL,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    updated_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const CREATE_CONTACT_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS contact_messages (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(200) NOT NULL,
    email VARCHAR(254) NOT NULL,
    phone VARCHAR(40) NULL,
    company VARCHAR(200) NULL,
    subject VARCHAR(200) NOT NULL,
    message TEXT NOT NULL,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Every table, in creation order.
pub const ALL_TABLES: &[(&str, &str)] = &[
    ("products", CREATE_PRODUCTS),
    ("news_posts", CREATE_NEWS_POSTS),
    ("certificates", CREATE_CERTIFICATES),
    ("careers", CREATE_CAREERS),
    ("contact_messages", CREATE_CONTACT_MESSAGES),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_creates_its_table() {
        for (table, sql) in ALL_TABLES {
            assert!(
                sql.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table)),
                "{} statement does not match its name",
                table
            );
        }
    }

    #[test]
    fn instants_are_not_bounded_by_2038() {
        for (table, sql) in ALL_TABLES {
            assert!(
                !sql.contains(" TIMESTAMP"),
                "{} declares a TIMESTAMP column",
                table
            );
            assert!(sql.contains("created_at DATETIME(6)"), "{}", table);
        }
    }
}
