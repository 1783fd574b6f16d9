//! Normalized result records
//!
//! A [`NormalizedRecord`] is the single shape handed back to the host for
//! rendering, merged from a static catalog entry and the cached directory
//! record. Merging is a pure function of its inputs.

use crate::catalog::CatalogEntry;
use crate::config::VendorSettings;
use crate::directory::RemoteInfo;
use serde::{Deserialize, Serialize};

/// Logo URL duplicated across every icon size slot the host renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSet {
    #[serde(rename = "1x")]
    pub one_x: String,
    #[serde(rename = "2x")]
    pub two_x: String,
    pub svg: String,
}

impl IconSet {
    /// Duplicate one URL into all three slots.
    pub fn from_logo(url: &str) -> Self {
        Self {
            one_x: url.to_string(),
            two_x: url.to_string(),
            svg: url.to_string(),
        }
    }
}

/// The unified record shape produced by merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Display name; suggestion mode embeds markup and attribution
    pub name: String,
    /// Catalog slug, or the sentinel slug in suggestion mode
    pub slug: String,
    /// Plugin identifier
    pub plugin: String,
    /// Always empty: curated records carry no installable version
    pub version: String,
    pub author: String,
    pub author_profile: String,
    /// Minimum host version; entry override wins over the remote default
    pub requires: Option<String>,
    pub tested: Option<String>,
    pub requires_runtime: Option<String>,
    pub rating: f64,
    pub num_ratings: u64,
    pub active_installs: u64,
    pub last_updated: String,
    pub short_description: String,
    /// Always empty: cards link out instead of downloading
    pub download_link: String,
    pub icons: IconSet,
    pub logo: IconSet,
    pub purchase: Option<String>,
    pub learn_more: Option<String>,
    /// Companion product note rendered under the card
    pub requirement: Option<String>,
    pub third_party: bool,
}

impl NormalizedRecord {
    /// Rewrite this record for suggestion-mode rendering: the slug becomes
    /// the sentinel identifying an injected card and the title gains an
    /// attribution line.
    pub fn into_suggestion(mut self, sentinel_slug: &str) -> Self {
        self.name = format!("<h3>{}</h3><strong>by {}</strong>", self.name, self.author);
        self.slug = sentinel_slug.to_string();
        self
    }
}

/// Merge a catalog entry with the shared directory record.
///
/// Precedence: the entry's compatibility fields override the remote
/// defaults; the entry's author (when present) overrides the vendor name;
/// description, logo, purchase and third-party flags always come from the
/// entry. Rating, ratings count, install count and last-updated always come
/// from the remote record.
pub fn merge(
    remote: &RemoteInfo,
    entry: &CatalogEntry,
    vendor: &VendorSettings,
) -> NormalizedRecord {
    let name = if entry.third_party {
        entry.name.clone()
    } else {
        format!("{} Add-on", entry.name)
    };

    let slug = if entry.third_party {
        entry.plugin.clone()
    } else {
        format!("{}-{}", vendor.slug_prefix, entry.plugin)
    };

    let author = entry
        .author
        .clone()
        .unwrap_or_else(|| vendor.name.clone());

    let logo = IconSet::from_logo(&entry.logo);

    NormalizedRecord {
        name,
        slug,
        plugin: entry.plugin.clone(),
        version: String::new(),
        author,
        author_profile: vendor.profile_url.clone(),
        requires: entry
            .compatibility
            .requires
            .clone()
            .or_else(|| remote.requires.clone()),
        tested: entry
            .compatibility
            .tested
            .clone()
            .or_else(|| remote.tested.clone()),
        requires_runtime: entry
            .compatibility
            .requires_runtime
            .clone()
            .or_else(|| remote.requires_php.clone()),
        rating: remote.rating,
        num_ratings: remote.num_ratings,
        active_installs: remote.active_installs,
        last_updated: remote.last_updated.clone(),
        short_description: entry.short_description.clone(),
        download_link: String::new(),
        icons: logo.clone(),
        logo,
        purchase: entry.purchase.clone(),
        learn_more: entry.learn_more.clone(),
        requirement: entry.requirement.clone(),
        third_party: entry.third_party,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_addons, default_third_party, Compatibility, CatalogEntry};

    fn remote() -> RemoteInfo {
        RemoteInfo {
            rating: 96.0,
            num_ratings: 41,
            active_installs: 10_000,
            last_updated: "2026-08-01 9:00am GMT".to_string(),
            requires: Some("5.4".to_string()),
            tested: Some("6.0".to_string()),
            requires_php: Some("7.4".to_string()),
            icons: Default::default(),
        }
    }

    fn vendor() -> VendorSettings {
        VendorSettings::default()
    }

    #[test]
    fn test_first_party_slug_and_title() {
        let entry = &default_addons()[0];
        let record = merge(&remote(), entry, &vendor());

        assert_eq!(record.slug, "cocart-products");
        assert_eq!(record.name, "Products Add-on");
        assert_eq!(record.author, "CoCart");
        assert!(!record.third_party);
    }

    #[test]
    fn test_third_party_keeps_slug_and_author() {
        let entry = &default_third_party()[0];
        let record = merge(&remote(), entry, &vendor());

        assert_eq!(record.slug, "woocommerce-name-your-price");
        assert_eq!(record.name, "WooCommerce Name Your Price");
        assert_eq!(record.author, "Kathy Darling");
    }

    #[test]
    fn test_entry_compatibility_overrides_remote() {
        let entry = &default_addons()[0];
        let record = merge(&remote(), entry, &vendor());

        assert_eq!(record.requires.as_deref(), Some("5.2"));
        assert_eq!(record.requires_runtime.as_deref(), Some("7.2"));
    }

    #[test]
    fn test_remote_defaults_fill_missing_compatibility() {
        let mut entry: CatalogEntry = default_addons()[0].clone();
        entry.compatibility = Compatibility {
            requires: None,
            tested: None,
            requires_runtime: None,
        };
        let record = merge(&remote(), &entry, &vendor());

        assert_eq!(record.requires.as_deref(), Some("5.4"));
        assert_eq!(record.tested.as_deref(), Some("6.0"));
        assert_eq!(record.requires_runtime.as_deref(), Some("7.4"));
    }

    #[test]
    fn test_logo_duplicated_across_icon_slots() {
        let entry = &default_addons()[0];
        let record = merge(&remote(), entry, &vendor());

        assert_eq!(record.icons, record.logo);
        assert_eq!(record.logo.one_x, entry.logo);
        assert_eq!(record.logo.two_x, entry.logo);
        assert_eq!(record.logo.svg, entry.logo);
    }

    #[test]
    fn test_merge_is_pure() {
        let entry = &default_addons()[1];
        let a = merge(&remote(), entry, &vendor());
        let b = merge(&remote(), entry, &vendor());
        assert_eq!(a, b);
    }

    #[test]
    fn test_suggestion_rewrite() {
        let entry = &default_addons()[0];
        let record = merge(&remote(), entry, &vendor()).into_suggestion("cocart-plugin-search");

        assert_eq!(record.slug, "cocart-plugin-search");
        assert_eq!(
            record.name,
            "<h3>Products Add-on</h3><strong>by CoCart</strong>"
        );
    }
}
