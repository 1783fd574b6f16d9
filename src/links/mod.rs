//! Action link resolution for result cards
//!
//! Given a normalized record and the caller-supplied installation state,
//! compute the ordered set of rendered links/buttons for the card. The
//! resolver issues no queries of its own and keeps no state; links are
//! recomputed on every render.

use crate::catalog::CatalogStore;
use crate::config::VendorSettings;
use crate::record::NormalizedRecord;
use crate::sanitize::{escape_attr, sanitize, strip_tags};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Installation state of the real plugin behind a card, supplied by the
/// caller at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallState {
    /// Plugin is not installed; `install_url` is the directory install
    /// endpoint when one exists
    NotInstalled { install_url: Option<String> },
    /// Installed with an update pending
    UpdateAvailable { file: String, update_url: String },
    /// Installed at the same or a newer version
    UpToDate { file: String, active: bool },
}

/// What the current caller is allowed to do.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub install: bool,
    pub update: bool,
    pub activate: bool,
}

/// Host environment facts needed to render links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostContext {
    /// Running host platform version
    pub host_version: String,
    /// Running runtime version
    pub runtime_version: String,
    /// Multi-site network admin context switches activation to network-wide
    pub network_admin: bool,
    /// Base URL activation links are built against
    pub activation_base_url: String,
}

/// Identifies a slot in the ordered link set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKey {
    Purchase,
    NotCompatible,
    UpdateNow,
    CannotUpdate,
    Active,
    Activate,
    Installed,
    LearnMore,
    Requirement,
}

impl LinkKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::NotCompatible => "not-compatible",
            Self::UpdateNow => "update-now",
            Self::CannotUpdate => "cannot-update",
            Self::Active => "active",
            Self::Activate => "activate",
            Self::Installed => "installed",
            Self::LearnMore => "learn-more",
            Self::Requirement => "requirement",
        }
    }
}

/// One rendered link or indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLink {
    pub key: LinkKey,
    pub html: String,
}

/// Ordered set of links keyed by [`LinkKey`]; insertion order is render
/// order and keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    links: Vec<ActionLink>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: LinkKey, html: String) {
        self.links.retain(|l| l.key != key);
        self.links.push(ActionLink { key, html });
    }

    pub fn get(&self, key: LinkKey) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.html.as_str())
    }

    pub fn contains(&self, key: LinkKey) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<LinkKey> {
        self.links.iter().map(|l| l.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Lenient version comparison: directory versions are often two-segment
/// ("5.2"), so missing segments are padded before parsing. Unparseable
/// requirements never block an action.
fn version_gte(have: &str, need: &str) -> bool {
    match (parse_lenient(have), parse_lenient(need)) {
        (Some(have), Some(need)) => have >= need,
        _ => true,
    }
}

fn parse_lenient(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut parts: Vec<&str> = trimmed.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    Version::parse(&parts[..3].join(".")).ok()
}

fn disabled_button(label: &str) -> String {
    format!(
        r#"<button type="button" class="button button-disabled" disabled="disabled">{}</button>"#,
        label
    )
}

/// Resolve the ordered link set for one record.
///
/// Records whose slug is neither the suggestion sentinel nor a catalog key
/// are not ours: the default links pass through unmodified. For our records
/// the defaults are discarded and rebuilt from the state machine, then the
/// unconditional learn-more / requirement entries are appended.
pub fn resolve_links(
    catalog: &CatalogStore,
    vendor: &VendorSettings,
    record: &NormalizedRecord,
    default_links: LinkSet,
    state: &InstallState,
    caps: Capabilities,
    ctx: &HostContext,
) -> LinkSet {
    let known = record.slug == vendor.suggestion_slug || catalog.get(&record.slug).is_some();
    if !known {
        return default_links;
    }

    let mut links = LinkSet::new();

    let compatible_host = record
        .requires
        .as_deref()
        .map(|req| version_gte(&ctx.host_version, req))
        .unwrap_or(true);
    let compatible_runtime = record
        .requires_runtime
        .as_deref()
        .map(|req| version_gte(&ctx.runtime_version, req))
        .unwrap_or(true);
    let compatible = compatible_host && compatible_runtime;

    // Accessible name for aria labels: title text without markup.
    let name = strip_tags(&sanitize(&record.name));
    let name = if record.version.is_empty() {
        name
    } else {
        format!("{} {}", name, record.version)
    };

    if caps.install || caps.update {
        match state {
            InstallState::NotInstalled { install_url } => {
                if install_url.is_some() {
                    if compatible {
                        if let Some(purchase) = &record.purchase {
                            links.insert(
                                LinkKey::Purchase,
                                format!(
                                    r#"<a class="addon-suggest-primary button" data-slug="{}" href="{}" target="_blank" aria-label="Purchase {} now" data-name="{}">Purchase Now</a>"#,
                                    escape_attr(&record.slug),
                                    escape_attr(purchase),
                                    escape_attr(&name),
                                    escape_attr(&name),
                                ),
                            );
                        }
                    } else {
                        links.insert(LinkKey::NotCompatible, disabled_button("Not Compatible"));
                    }
                }
            }
            InstallState::UpdateAvailable { file, update_url } => {
                if compatible {
                    links.insert(
                        LinkKey::UpdateNow,
                        format!(
                            r#"<a class="update-now button aria-button-if-js" data-plugin="{}" data-slug="{}" href="{}" aria-label="Update {} now" data-name="{}">Update Now</a>"#,
                            escape_attr(file),
                            escape_attr(&record.slug),
                            escape_attr(update_url),
                            escape_attr(&name),
                            escape_attr(&name),
                        ),
                    );
                } else {
                    links.insert(LinkKey::CannotUpdate, disabled_button("Cannot Update"));
                }
            }
            InstallState::UpToDate { file, active } => {
                if *active {
                    links.insert(LinkKey::Active, disabled_button("Installed & Active"));
                } else if caps.activate {
                    if compatible {
                        let (label, url) = activation_link(file, ctx);
                        links.insert(
                            LinkKey::Activate,
                            format!(
                                r#"<a href="{}" class="button activate-now" aria-label="{} {}">{}</a>"#,
                                escape_attr(&url),
                                label,
                                escape_attr(&name),
                                label,
                            ),
                        );
                    } else {
                        links.insert(LinkKey::NotCompatible, disabled_button("Not Compatible"));
                    }
                } else {
                    links.insert(LinkKey::Installed, disabled_button("Installed"));
                }
            }
        }
    }

    append_trailing_links(&mut links, record);

    links
}

/// Build the activation URL and label, switching to the network-wide form
/// in a network admin context.
fn activation_link(file: &str, ctx: &HostContext) -> (&'static str, String) {
    let mut url = format!(
        "{}?action=activate&plugin={}",
        ctx.activation_base_url,
        urlencoding::encode(file)
    );

    if ctx.network_admin {
        url.push_str("&networkwide=1");
        ("Network Activate", url)
    } else {
        ("Activate", url)
    }
}

/// Unconditional entries appended after the state machine: an external
/// learn-more link and a companion-product requirement note.
fn append_trailing_links(links: &mut LinkSet, record: &NormalizedRecord) {
    if let Some(learn_more) = &record.learn_more {
        links.insert(
            LinkKey::LearnMore,
            format!(
                r#"<a class="addon-suggest__learn-more" href="{}" target="_blank" data-addon="{}" data-track="learn_more">Learn more</a>"#,
                escape_attr(learn_more),
                escape_attr(&record.plugin),
            ),
        );
    }

    if let Some(requirement) = &record.requirement {
        links.insert(
            LinkKey::Requirement,
            format!(
                r#"<div class="plugin-requirement"><strong>Plugin Requires:</strong> {}</div>"#,
                crate::sanitize::escape_html(requirement),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_addons;
    use crate::directory::RemoteInfo;
    use crate::record::merge;

    fn ctx() -> HostContext {
        HostContext {
            host_version: "5.6".to_string(),
            runtime_version: "7.4".to_string(),
            network_admin: false,
            activation_base_url: "/wp-admin/plugins.php".to_string(),
        }
    }

    fn all_caps() -> Capabilities {
        Capabilities {
            install: true,
            update: true,
            activate: true,
        }
    }

    fn record() -> NormalizedRecord {
        merge(
            &RemoteInfo::default(),
            &default_addons()[0],
            &VendorSettings::default(),
        )
    }

    fn resolve(
        record: &NormalizedRecord,
        state: &InstallState,
        caps: Capabilities,
        ctx: &HostContext,
    ) -> LinkSet {
        resolve_links(
            &CatalogStore::default(),
            &VendorSettings::default(),
            record,
            LinkSet::new(),
            state,
            caps,
            ctx,
        )
    }

    #[test]
    fn test_version_gte_pads_segments() {
        assert!(version_gte("5.6", "5.2"));
        assert!(version_gte("5.2", "5.2"));
        assert!(!version_gte("5.1", "5.2"));
        assert!(version_gte("7.4.33", "7.2"));
        // Unparseable requirements never block.
        assert!(version_gte("5.6", "not-a-version"));
    }

    #[test]
    fn test_not_installed_with_purchase() {
        let state = InstallState::NotInstalled {
            install_url: Some("https://directory.test/install".to_string()),
        };
        let links = resolve(&record(), &state, all_caps(), &ctx());

        assert!(links.contains(LinkKey::Purchase));
        assert!(!links.contains(LinkKey::NotCompatible));
        assert!(links.get(LinkKey::Purchase).unwrap().contains("Purchase Now"));
    }

    #[test]
    fn test_not_installed_without_purchase_is_browse_only() {
        let mut record = record();
        record.purchase = None;
        let state = InstallState::NotInstalled {
            install_url: Some("https://directory.test/install".to_string()),
        };
        let links = resolve(&record, &state, all_caps(), &ctx());

        // Only the unconditional trailers remain.
        assert!(!links.contains(LinkKey::Purchase));
        assert!(links.contains(LinkKey::LearnMore));
        assert!(links.contains(LinkKey::Requirement));
    }

    #[test]
    fn test_incompatible_runtime_omits_purchase() {
        let mut ctx = ctx();
        ctx.runtime_version = "7.0".to_string();
        let state = InstallState::NotInstalled {
            install_url: Some("https://directory.test/install".to_string()),
        };
        let links = resolve(&record(), &state, all_caps(), &ctx);

        assert!(links.contains(LinkKey::NotCompatible));
        assert!(!links.contains(LinkKey::Purchase));
    }

    #[test]
    fn test_update_available() {
        let state = InstallState::UpdateAvailable {
            file: "cocart-products/cocart-products.php".to_string(),
            update_url: "https://host.test/update".to_string(),
        };
        let links = resolve(&record(), &state, all_caps(), &ctx());

        let html = links.get(LinkKey::UpdateNow).unwrap();
        assert!(html.contains("cocart-products/cocart-products.php"));
        assert!(html.contains(r#"data-slug="cocart-products""#));
    }

    #[test]
    fn test_update_available_incompatible() {
        let mut ctx = ctx();
        ctx.host_version = "5.0".to_string();
        let state = InstallState::UpdateAvailable {
            file: "cocart-products/cocart-products.php".to_string(),
            update_url: "https://host.test/update".to_string(),
        };
        let links = resolve(&record(), &state, all_caps(), &ctx);

        assert!(links.contains(LinkKey::CannotUpdate));
        assert!(!links.contains(LinkKey::UpdateNow));
    }

    #[test]
    fn test_up_to_date_active() {
        let state = InstallState::UpToDate {
            file: "cocart-products/cocart-products.php".to_string(),
            active: true,
        };
        let links = resolve(&record(), &state, all_caps(), &ctx());

        assert!(links.contains(LinkKey::Active));
        assert!(!links.contains(LinkKey::Activate));
        assert!(!links.contains(LinkKey::Purchase));
        // Exactly one state-machine entry plus the two trailers.
        assert_eq!(
            links.keys(),
            vec![LinkKey::Active, LinkKey::LearnMore, LinkKey::Requirement]
        );
    }

    #[test]
    fn test_up_to_date_inactive_activates() {
        let state = InstallState::UpToDate {
            file: "cocart-products/cocart-products.php".to_string(),
            active: false,
        };
        let links = resolve(&record(), &state, all_caps(), &ctx());

        let html = links.get(LinkKey::Activate).unwrap();
        assert!(html.contains(">Activate</a>"));
        assert!(html.contains("action=activate"));
        assert!(!html.contains("networkwide"));
    }

    #[test]
    fn test_network_admin_activation() {
        let mut ctx = ctx();
        ctx.network_admin = true;
        let state = InstallState::UpToDate {
            file: "cocart-products/cocart-products.php".to_string(),
            active: false,
        };
        let links = resolve(&record(), &state, all_caps(), &ctx);

        let html = links.get(LinkKey::Activate).unwrap();
        assert!(html.contains("Network Activate"));
        assert!(html.contains("networkwide=1"));
    }

    #[test]
    fn test_up_to_date_inactive_without_activate_capability() {
        let caps = Capabilities {
            install: true,
            update: true,
            activate: false,
        };
        let state = InstallState::UpToDate {
            file: "cocart-products/cocart-products.php".to_string(),
            active: false,
        };
        let links = resolve(&record(), &state, caps, &ctx());

        assert!(links.contains(LinkKey::Installed));
        assert!(!links.contains(LinkKey::Activate));
    }

    #[test]
    fn test_no_install_or_update_capability_yields_no_actions() {
        let state = InstallState::NotInstalled {
            install_url: Some("https://directory.test/install".to_string()),
        };
        let links = resolve(&record(), &state, Capabilities::default(), &ctx());

        assert!(!links.contains(LinkKey::Purchase));
        assert!(!links.contains(LinkKey::NotCompatible));
        // Trailers still render.
        assert!(links.contains(LinkKey::LearnMore));
    }

    #[test]
    fn test_unknown_slug_passes_defaults_through() {
        let mut record = record();
        record.slug = "some-unrelated-plugin".to_string();

        let mut defaults = LinkSet::new();
        defaults.insert(LinkKey::Installed, "<button>default</button>".to_string());

        let state = InstallState::UpToDate {
            file: "x/x.php".to_string(),
            active: true,
        };
        let links = resolve_links(
            &CatalogStore::default(),
            &VendorSettings::default(),
            &record,
            defaults.clone(),
            &state,
            all_caps(),
            &ctx(),
        );

        assert_eq!(links, defaults);
    }

    #[test]
    fn test_suggestion_sentinel_slug_is_ours() {
        let record = record().into_suggestion("cocart-plugin-search");
        let state = InstallState::NotInstalled {
            install_url: Some("https://directory.test/install".to_string()),
        };
        let links = resolve(&record, &state, all_caps(), &ctx());

        assert!(links.contains(LinkKey::Purchase));
        // aria name comes from the sanitized title, markup stripped.
        assert!(!links.get(LinkKey::Purchase).unwrap().contains("<h3>"));
    }
}
