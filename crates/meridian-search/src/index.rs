//! The hardcoded part of the corpus.

use crate::entry::SearchEntry;
use meridian_core::site::SITE_PAGES;

/// Every fixed site page as a search entry, in declaration order.
pub fn static_index() -> Vec<SearchEntry> {
    SITE_PAGES.iter().map(SearchEntry::from).collect()
}
