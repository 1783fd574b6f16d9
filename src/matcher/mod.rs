//! Search query normalization and suggestion matching
//!
//! Takes a raw directory search term and reduces it to something the
//! keyword tables can be scanned with: URL-decoded, lowercased, stripped to
//! `[a-z ]`, with vendor and ecosystem tokens removed.

use crate::catalog::{CatalogEntry, CatalogStore};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z ]").unwrap());

/// Normalize a raw search term for matching.
///
/// The stoplist tokens are removed after the character strip, in list
/// order, each in a single pass.
pub fn normalize(raw: &str, stoplist: &[String]) -> String {
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    let mut term = decoded.to_lowercase();
    term = NON_ALPHA.replace_all(&term, "").into_owned();

    for token in stoplist {
        term = term.replace(token.as_str(), "");
    }

    term.trim().to_string()
}

/// Scan the catalog for the first entry whose keywords-or-name haystack
/// contains the normalized query as a substring.
///
/// Scan order is fixed: add-ons in declaration order, then third-party
/// entries. Note that an empty normalized query matches every haystack
/// trivially; callers gate injection on a non-empty raw term, and no
/// further guard exists here.
pub fn find_match<'a>(catalog: &'a CatalogStore, normalized_query: &str) -> Option<&'a CatalogEntry> {
    catalog
        .list_all()
        .into_iter()
        .find(|entry| haystack(entry).contains(normalized_query))
}

fn haystack(entry: &CatalogEntry) -> String {
    format!("{}, {}", entry.search_terms_joined(), entry.name).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VendorSettings;

    fn stoplist() -> Vec<String> {
        VendorSettings::default().stoplist
    }

    #[test]
    fn test_normalize_lowercases_and_strips() {
        assert_eq!(normalize("Name Your Price!!", &stoplist()), "name your price");
        assert_eq!(normalize("ACF (fields) 2.0", &stoplist()), "acf fields");
    }

    #[test]
    fn test_normalize_url_decodes() {
        assert_eq!(normalize("name%20your%20price", &stoplist()), "name your price");
    }

    #[test]
    fn test_normalize_removes_stoplist_tokens() {
        assert_eq!(normalize("cocart products", &stoplist()), "products");
        assert_eq!(normalize("free woocommerce nyp", &stoplist()), "nyp");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "CoCart Products",
            "name%20your%20price",
            "yoast SEO for WordPress",
            "nyp",
            "",
        ] {
            let once = normalize(raw, &stoplist());
            let twice = normalize(&once, &stoplist());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_find_match_nyp() {
        let catalog = CatalogStore::default();
        let query = normalize("nyp", &stoplist());
        let entry = find_match(&catalog, &query).unwrap();
        assert_eq!(entry.key, "woocommerce-name-your-price");
    }

    #[test]
    fn test_find_match_after_stoplist_removal() {
        let catalog = CatalogStore::default();
        let query = normalize("cocart products", &stoplist());
        assert_eq!(query, "products");
        let entry = find_match(&catalog, &query).unwrap();
        assert_eq!(entry.key, "cocart-products");
    }

    #[test]
    fn test_find_match_none() {
        let catalog = CatalogStore::default();
        let query = normalize("unrelated gardening tool", &stoplist());
        assert!(find_match(&catalog, &query).is_none());
    }

    #[test]
    fn test_find_match_empty_catalog() {
        let catalog = CatalogStore::new(vec![], vec![]);
        assert!(find_match(&catalog, "products").is_none());
    }

    #[test]
    fn test_match_only_on_substring_containment() {
        let catalog = CatalogStore::default();
        let query = normalize("yoast", &stoplist());
        let entry = find_match(&catalog, &query).unwrap();
        assert!(haystack(entry).contains(&query));
    }

    #[test]
    fn test_empty_query_matches_first_entry() {
        // Latent edge case kept from the source: an all-stopword query
        // normalizes to "" and trivially matches the first catalog entry.
        let catalog = CatalogStore::default();
        let entry = find_match(&catalog, "").unwrap();
        assert_eq!(entry.key, "cocart-products");
    }
}
