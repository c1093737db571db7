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

use chrono::Utc;
use meridian_core::product::{Product, ProductInput};
use meridian_core::store::ContentStore;
use meridian_core::InMemoryContentStore;
use meridian_search::engine::MAX_LIMIT;
use meridian_search::scorer::{score, PreparedQuery};
use meridian_search::{perform_search, search_site, EntryKind, RemoteCollections, SearchEntry};
use proptest::prelude::*;

fn product(id: i64, name: String, category: String) -> Product {
    ProductInput {
        name,
        category,
        description: "Industrial equipment".into(),
        ..Default::default()
    }
    .into_product(id, Utc::now())
}

fn bare_entry(title: String, keywords: Vec<String>) -> SearchEntry {
    SearchEntry {
        id: title.clone(),
        kind: EntryKind::Page,
        title,
        description: String::new(),
        content: String::new(),
        category: String::new(),
        keywords,
        url: "/".into(),
        priority: 1,
    }
}

proptest! {
    #[test]
    fn results_are_sorted_and_bounded(
        names in prop::collection::vec("[a-z]{2,8}( [a-z]{2,8}){0,2}", 0..40),
        query in "[a-z]{2,6}",
        limit in 0usize..80,
    ) {
        let products = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| product(i as i64 + 1, n, "Pumps".into()))
            .collect();
        let collections = RemoteCollections { products: Some(products), ..Default::default() };
        let results = perform_search(&query, &collections, Some(limit));

        prop_assert!(results.results.len() <= limit.clamp(1, MAX_LIMIT));
        prop_assert!(results.results.len() <= results.total);
        for pair in results.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(results.results.iter().all(|h| h.score > 0));
    }

    #[test]
    fn exact_title_beats_keyword_only(
        query in "[a-z]{2,10}",
        extra in prop::collection::vec("[a-z]{0,6}", 0..10),
    ) {
        let prepared = PreparedQuery::new(&query).unwrap();
        let exact = bare_entry(query.clone(), Vec::new());
        // Every keyword contains the query, so each one hits.
        let keywords = extra.into_iter().map(|e| format!("{}{}", query, e)).collect();
        let tagged = bare_entry("zz".into(), keywords);
        prop_assume!(!"zz".contains(query.as_str()));

        prop_assert!(score(&exact, &prepared) > score(&tagged, &prepared));
    }
}

#[test]
fn store_backed_search_includes_catalog() {
    let store = InMemoryContentStore::new();
    tokio_test::block_on(async {
        store
            .create_product(ProductInput {
                name: "Dosing Skid DS-12".into(),
                category: "Skids".into(),
                description: "Chemical dosing package".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let results = search_site(&store, "dosing", None).await;
        assert_eq!(results.results[0].kind, EntryKind::Product);
        assert_eq!(results.results[0].title, "Dosing Skid DS-12");
    });
}
