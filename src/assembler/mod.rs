//! Result set assembly
//!
//! Glues the catalog, the cached directory record, the matcher and the
//! merger into the two host-facing behaviors: injecting a single suggestion
//! card into third-party search results, and replacing browse results with
//! the vendor catalog. Each method is a pipeline stage: request context in,
//! transformed result page out.

use crate::catalog::CatalogStore;
use crate::config::VendorSettings;
use crate::directory::RemoteInfo;
use crate::matcher;
use crate::record::{self, NormalizedRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Screen identifier the host sends for the plugin installation screen.
/// Nothing attaches anywhere else.
pub const PLUGIN_INSTALL_SCREEN: &str = "plugin-install";

/// Whether the suggestion behavior should attach to the identified screen.
pub fn is_plugin_install_screen(screen: &str) -> bool {
    screen == PLUGIN_INSTALL_SCREEN
}

/// Search request arguments forwarded by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchArgs {
    /// Raw search term; empty or absent means no injection
    #[serde(default)]
    pub search: Option<String>,
}

/// Browse request arguments for the vendor tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseArgs {
    /// Author namespace the browse is scoped to
    pub author: Option<String>,
    pub page: u32,
    pub per_page: u32,
    pub locale: String,
    /// Keys of plugins currently installed on the host (caller snapshot)
    #[serde(default)]
    pub installed_plugins: Vec<String>,
}

/// Pagination info carried on a directory result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: u64,
}

fn default_page() -> u32 {
    1
}

/// A page of directory results. Organic entries stay in their original
/// shape; injected records are serialized into the same list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub info: PageInfo,
    #[serde(default)]
    pub plugins: Vec<Value>,
}

/// Strings the host shows beside an injected suggestion card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionNotice {
    pub legend: String,
    pub support_text: String,
    pub support_link: String,
}

/// Browse tab entry: (slug, label).
pub type Tab = (String, String);

/// Assembles final result pages from the catalog and the shared directory
/// record.
#[derive(Debug, Clone)]
pub struct Assembler {
    catalog: CatalogStore,
    vendor: VendorSettings,
}

impl Assembler {
    pub fn new(catalog: CatalogStore, vendor: VendorSettings) -> Self {
        Self { catalog, vendor }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn vendor(&self) -> &VendorSettings {
        &self.vendor
    }

    /// Inject at most one suggestion card into a search result page.
    ///
    /// The page passes through unchanged unless all of the following hold:
    /// this is page 1, the raw search term is non-empty, the directory
    /// record is available, and the matcher finds a catalog entry for the
    /// normalized term. The injected record carries the sentinel slug and an
    /// attribution title, appended at the bottom of the list.
    pub fn inject_suggestion(
        &self,
        args: &SearchArgs,
        remote: Option<&RemoteInfo>,
        mut page: ResultPage,
    ) -> ResultPage {
        let term = match args.search.as_deref() {
            Some(term) if !term.trim().is_empty() => term,
            _ => return page,
        };

        if page.info.page > 1 {
            return page;
        }

        let remote = match remote {
            Some(remote) => remote,
            None => return page,
        };

        let normalized = matcher::normalize(term, &self.vendor.stoplist);

        if let Some(entry) = matcher::find_match(&self.catalog, &normalized) {
            debug!(term, entry = %entry.key, "injecting suggestion card");

            let suggestion = record::merge(remote, entry, &self.vendor)
                .into_suggestion(&self.vendor.suggestion_slug);

            if let Ok(value) = serde_json::to_value(&suggestion) {
                page.plugins.push(value);
            }
        }

        page
    }

    /// Replace a vendor-scoped browse page with the full catalog.
    ///
    /// Pages not scoped to the vendor author namespace pass through, as does
    /// any page while the directory record is unavailable. Otherwise the
    /// directory's organic results are discarded and every catalog entry is
    /// merged, in store order, paginated per the caller's page/per-page.
    pub fn catalog_page(
        &self,
        args: &BrowseArgs,
        remote: Option<&RemoteInfo>,
        page: ResultPage,
    ) -> ResultPage {
        if args.author.as_deref() != Some(self.vendor.author_namespace.as_str()) {
            return page;
        }

        let remote = match remote {
            Some(remote) => remote,
            None => return page,
        };

        let records: Vec<NormalizedRecord> = self
            .catalog
            .list_all()
            .into_iter()
            .map(|entry| record::merge(remote, entry, &self.vendor))
            .collect();

        let total = records.len() as u64;
        let page_no = args.page.max(1);
        let start = (page_no as usize - 1) * args.per_page as usize;

        let plugins = records
            .into_iter()
            .skip(start)
            .take(args.per_page as usize)
            .filter_map(|r| serde_json::to_value(&r).ok())
            .collect();

        ResultPage {
            info: PageInfo {
                page: page_no,
                results: total,
            },
            plugins,
        }
    }

    /// Append the vendor tab to the host's browse tab list.
    pub fn tabs(&self, mut tabs: Vec<Tab>) -> Vec<Tab> {
        tabs.push((self.vendor.slug_prefix.clone(), self.vendor.name.clone()));
        tabs
    }

    /// Build the browse args the host should use for the vendor tab.
    pub fn tab_args(&self, page: u32, locale: &str, installed_plugins: Vec<String>) -> BrowseArgs {
        BrowseArgs {
            author: Some(self.vendor.author_namespace.clone()),
            page: page.max(1),
            per_page: 30,
            locale: locale.to_string(),
            installed_plugins,
        }
    }

    /// Strings shown beside an injected suggestion card.
    pub fn notice(&self) -> SuggestionNotice {
        SuggestionNotice {
            legend: format!(
                "This suggestion was made by {}, the awesome REST API plugin already installed on your site.",
                self.vendor.name
            ),
            support_text: "Learn more about these suggestions.".to_string(),
            support_link: self.vendor.support_url.clone(),
        }
    }
}
