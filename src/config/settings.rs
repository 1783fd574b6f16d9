//! Settings structures for the suggestion engine

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vendor: VendorSettings,
    pub directory: DirectorySettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vendor: VendorSettings::default(),
            directory: DirectorySettings::default(),
            server: ServerSettings::default(),
            outgoing: OutgoingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (ADDON_SUGGEST_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ADDON_SUGGEST_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ADDON_SUGGEST_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("ADDON_SUGGEST_DIRECTORY_URL") {
            self.directory.endpoint = val;
        }
        if let Ok(val) = std::env::var("ADDON_SUGGEST_LOCALE") {
            self.directory.locale = val;
        }
    }
}

/// Vendor identity and matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorSettings {
    /// Vendor display name, used as the default card author
    pub name: String,
    /// Vendor package identifier within the directory
    pub package: String,
    /// Author namespace that scopes the vendor browse tab
    pub author_namespace: String,
    /// Slug prefix applied to first-party add-on records
    pub slug_prefix: String,
    /// Sentinel slug marking an injected suggestion card
    pub suggestion_slug: String,
    /// Vendor profile URL carried on merged records
    pub profile_url: String,
    /// Support page linked beside suggestion cards
    pub support_url: String,
    /// Tokens removed from search queries before matching
    pub stoplist: Vec<String>,
}

impl Default for VendorSettings {
    fn default() -> Self {
        Self {
            name: "CoCart".to_string(),
            package: "cart-rest-api-for-woocommerce".to_string(),
            author_namespace: "cocartforwc".to_string(),
            slug_prefix: "cocart".to_string(),
            suggestion_slug: "cocart-plugin-search".to_string(),
            profile_url: "https://cocartapi.com".to_string(),
            support_url: "https://cocartapi.com/plugin-search/".to_string(),
            stoplist: vec![
                "cocart".to_string(),
                "cart-rest-api-for-woocommerce".to_string(),
                "free".to_string(),
                "wordpress".to_string(),
                "woocommerce".to_string(),
            ],
        }
    }
}

/// Plugin directory endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Directory information endpoint
    pub endpoint: String,
    /// Slug whose metadata record backs every injected card
    pub target_slug: String,
    /// Locale forwarded so the directory localizes its response
    pub locale: String,
    /// Whether the host is served over SSL
    pub is_ssl: bool,
    /// Cached record lifetime in seconds
    pub cache_ttl: u64,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.wordpress.org/plugins/info/1.2/".to_string(),
            target_slug: "cart-rest-api-for-woocommerce".to_string(),
            locale: "en_US".to_string(),
            is_ssl: true,
            // 24 hours
            cache_ttl: 86_400,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Host platform version used for compatibility checks
    pub host_version: String,
    /// Runtime version used for compatibility checks
    pub runtime_version: String,
    /// Base URL for plugin activation links
    pub activation_base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8811,
            bind_address: "127.0.0.1".to_string(),
            host_version: "5.6".to_string(),
            runtime_version: "7.4".to_string(),
            activation_base_url: "/wp-admin/plugins.php".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Maximum idle connections per host
    pub pool_maxsize: usize,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            verify_ssl: true,
            pool_maxsize: 10,
        }
    }
}
