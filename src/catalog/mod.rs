//! Static catalog of vendor add-ons and supported third-party plugins
//!
//! The catalog is fixed configuration loaded at process start. Nothing here
//! performs I/O; the store only answers ordered listing queries.

use serde::{Deserialize, Serialize};

/// Host/runtime version requirements declared by a catalog entry.
///
/// These override the defaults carried by the remote directory record when a
/// record is merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    /// Minimum host platform version
    pub requires: Option<String>,
    /// Highest host platform version the entry was tested against
    pub tested: Option<String>,
    /// Minimum runtime version
    pub requires_runtime: Option<String>,
}

impl Compatibility {
    pub fn new(requires: &str, tested: &str, requires_runtime: &str) -> Self {
        Self {
            requires: Some(requires.to_string()),
            tested: Some(tested.to_string()),
            requires_runtime: Some(requires_runtime.to_string()),
        }
    }
}

/// A single curated catalog entry, either a first-party add-on or a
/// supported third-party plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique key identifying the entry ("cocart-products", ...)
    pub key: String,
    /// Display name shown on the card
    pub name: String,
    /// Plugin identifier within the vendor or directory namespace
    pub plugin: String,
    /// Author override; the vendor name is used when absent
    pub author: Option<String>,
    /// Keywords matched against normalized search queries
    pub search_terms: Vec<String>,
    /// One-line card description
    pub short_description: String,
    /// Card logo URL, duplicated into every icon slot at merge time
    pub logo: String,
    /// Companion product required by this entry, if any
    pub requirement: Option<String>,
    /// Version requirements, overriding remote defaults
    pub compatibility: Compatibility,
    /// Pricing page, present only for paid entries
    pub purchase: Option<String>,
    /// Documentation page linked from the card
    pub learn_more: Option<String>,
    /// Third-party entries keep their directory slug and author
    pub third_party: bool,
}

impl CatalogEntry {
    /// Keyword list as stored at rest: comma-joined, declaration order.
    pub fn search_terms_joined(&self) -> String {
        self.search_terms.join(", ")
    }
}

/// Ordered store of catalog entries: add-ons first, third-party after.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    addons: Vec<CatalogEntry>,
    third_party: Vec<CatalogEntry>,
}

impl CatalogStore {
    pub fn new(addons: Vec<CatalogEntry>, third_party: Vec<CatalogEntry>) -> Self {
        Self {
            addons,
            third_party,
        }
    }

    /// First-party add-ons in declaration order.
    pub fn list_addons(&self) -> &[CatalogEntry] {
        &self.addons
    }

    /// Supported third-party plugins in declaration order.
    pub fn list_third_party(&self) -> &[CatalogEntry] {
        &self.third_party
    }

    /// Every entry, add-ons before third-party.
    pub fn list_all(&self) -> Vec<&CatalogEntry> {
        self.addons.iter().chain(self.third_party.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.addons.len() + self.third_party.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addons.is_empty() && self.third_party.is_empty()
    }

    /// Look up an entry by its catalog key.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.list_all().into_iter().find(|e| e.key == key)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(default_addons(), default_third_party())
    }
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

const VENDOR_LOGO: &str = "https://cocartapi.com/assets/images/logo.jpg";

/// Built-in first-party add-on table.
pub fn default_addons() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            key: "cocart-products".to_string(),
            name: "Products".to_string(),
            plugin: "products".to_string(),
            author: None,
            search_terms: terms(&["products", "rest-api", "reviews"]),
            short_description: "Provides a public version of accessing products, categories, \
                                tags, attributes and even reviews without the need to \
                                authenticate."
                .to_string(),
            logo: VENDOR_LOGO.to_string(),
            requirement: Some("CoCart".to_string()),
            compatibility: Compatibility::new("5.2", "5.6", "7.2"),
            purchase: Some("https://cocartapi.com/pro/#pricing".to_string()),
            learn_more: Some("https://cocartapi.com/add-ons/products/".to_string()),
            third_party: false,
        },
        CatalogEntry {
            key: "cocart-acf".to_string(),
            name: "Advanced Custom Fields".to_string(),
            plugin: "acf".to_string(),
            author: None,
            search_terms: terms(&[
                "advanced",
                "acf",
                "fields",
                "custom fields",
                "meta",
                "repeater",
            ]),
            short_description: "Returns all custom meta data saved for all products using \
                                Advanced Custom Fields."
                .to_string(),
            logo: VENDOR_LOGO.to_string(),
            requirement: Some("CoCart Products".to_string()),
            compatibility: Compatibility::new("5.2", "5.6", "7.2"),
            purchase: Some("https://cocartapi.com/pro/#pricing".to_string()),
            learn_more: Some("https://cocartapi.com/add-ons/advanced-custom-fields/".to_string()),
            third_party: false,
        },
        CatalogEntry {
            key: "cocart-yoast-seo".to_string(),
            name: "Yoast SEO".to_string(),
            plugin: "yoast-seo".to_string(),
            author: None,
            search_terms: terms(&[
                "yoast",
                "seo",
                "xml sitemap",
                "content analysis",
                "readability",
                "schema",
            ]),
            short_description: "Returns all Yoast SEO data for all products, product categories \
                                and tags."
                .to_string(),
            logo: VENDOR_LOGO.to_string(),
            requirement: Some("CoCart Products".to_string()),
            compatibility: Compatibility::new("5.2", "5.6", "7.2"),
            purchase: Some("https://cocartapi.com/pro/#pricing".to_string()),
            learn_more: Some("https://cocartapi.com/add-ons/yoast-seo/".to_string()),
            third_party: false,
        },
    ]
}

/// Built-in supported third-party plugin table.
pub fn default_third_party() -> Vec<CatalogEntry> {
    vec![CatalogEntry {
        key: "woocommerce-name-your-price".to_string(),
        name: "WooCommerce Name Your Price".to_string(),
        plugin: "woocommerce-name-your-price".to_string(),
        author: Some("Kathy Darling".to_string()),
        search_terms: terms(&[
            "nyp",
            "woocommerce",
            "name your price",
            "pay what you want",
            "product page feature",
            "enhancements",
        ]),
        short_description: "Let customers pay what they want with Name Your Price".to_string(),
        logo: "https://ps.w.org/woocommerce/assets/icon-128x128.png?rev=2366418".to_string(),
        requirement: None,
        compatibility: Compatibility::new("5.2", "5.6", "7.2"),
        purchase: None,
        learn_more: Some("https://woocommerce.com/products/name-your-price/".to_string()),
        third_party: true,
    }]
}
