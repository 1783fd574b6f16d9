//! Plugin directory client and metadata cache
//!
//! One remote record backs every injected card: the vendor package's own
//! directory entry supplies the ratings, install counts and last-updated
//! fields shared across suggestions. The record is fetched at most once per
//! cache miss and kept for the configured TTL. Failures are surfaced as an
//! explicit unavailable signal and never cached, so the next call retries.

use crate::config::{DirectorySettings, OutgoingSettings};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Directory fetch failure; callers treat any variant as "unavailable".
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("directory returned HTTP {0}")]
    Http(u16),
    #[error("malformed directory payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Shared metadata record from the plugin directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteInfo {
    /// Aggregate rating (directory scale, 0-100)
    pub rating: f64,
    pub num_ratings: u64,
    pub active_installs: u64,
    /// Directory-formatted timestamp of the last release
    pub last_updated: String,
    /// Default minimum host version, overridden per entry
    pub requires: Option<String>,
    /// Default tested host version, overridden per entry
    pub tested: Option<String>,
    /// Default minimum runtime version, overridden per entry
    pub requires_php: Option<String>,
    /// Icon URLs keyed by size slot
    pub icons: HashMap<String, String>,
}

/// HTTP client for the plugin directory information endpoint.
#[derive(Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(outgoing: &OutgoingSettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(outgoing.request_timeout))
            .pool_max_idle_per_host(outgoing.pool_maxsize)
            .gzip(true);

        if !outgoing.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch the information record for the configured target slug.
    ///
    /// The field selectors trim the payload to what merging needs, matching
    /// the query the host platform itself would send.
    pub async fn fetch_info(
        &self,
        settings: &DirectorySettings,
    ) -> Result<RemoteInfo, DirectoryError> {
        let ssl_flag = if settings.is_ssl { "1" } else { "0" };
        let params = [
            ("action", "plugin_information"),
            ("request[slug]", settings.target_slug.as_str()),
            ("request[locale]", settings.locale.as_str()),
            ("request[is_ssl]", ssl_flag),
            ("request[fields][short_description]", "0"),
            ("request[fields][sections]", "0"),
            ("request[fields][versions]", "0"),
            ("request[fields][banners]", "0"),
            ("request[fields][reviews]", "1"),
            ("request[fields][icons]", "1"),
            ("request[fields][active_installs]", "1"),
        ];

        let response = self
            .client
            .get(&settings.endpoint)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let info: RemoteInfo = serde_json::from_str(&body)?;

        debug!(
            slug = %settings.target_slug,
            active_installs = info.active_installs,
            "fetched directory record"
        );

        Ok(info)
    }
}

/// TTL cache in front of [`DirectoryClient::fetch_info`].
///
/// Only successful records are cached. Concurrent misses may race on
/// population; the last successful write wins, which costs at most one
/// redundant fetch.
pub struct RemoteInfoCache {
    cache: Cache<String, RemoteInfo>,
    client: DirectoryClient,
    settings: DirectorySettings,
}

impl RemoteInfoCache {
    pub fn new(client: DirectoryClient, settings: DirectorySettings) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(settings.cache_ttl))
            .max_capacity(8)
            .build();

        Self {
            cache,
            client,
            settings,
        }
    }

    /// Return the cached record, fetching on a miss.
    pub async fn get(&self) -> Result<RemoteInfo, DirectoryError> {
        let key = self.settings.target_slug.clone();

        if let Some(info) = self.cache.get(&key).await {
            return Ok(info);
        }

        match self.client.fetch_info(&self.settings).await {
            Ok(info) => {
                self.cache.insert(key, info.clone()).await;
                Ok(info)
            }
            Err(err) => {
                warn!(error = %err, "directory metadata unavailable");
                Err(err)
            }
        }
    }

    /// Drop the cached record, forcing the next call to refetch.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_info_parses_directory_payload() {
        let body = r#"{
            "name": "CoCart",
            "slug": "cart-rest-api-for-woocommerce",
            "rating": 96.0,
            "num_ratings": 41,
            "active_installs": 10000,
            "last_updated": "2026-08-01 9:00am GMT",
            "requires": "5.4",
            "tested": "6.0",
            "requires_php": "7.4",
            "icons": { "1x": "https://example.test/icon.png" }
        }"#;

        let info: RemoteInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.num_ratings, 41);
        assert_eq!(info.requires.as_deref(), Some("5.4"));
        assert_eq!(
            info.icons.get("1x").map(String::as_str),
            Some("https://example.test/icon.png")
        );
    }

    #[test]
    fn test_remote_info_tolerates_missing_fields() {
        let info: RemoteInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.active_installs, 0);
        assert!(info.requires.is_none());
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let parsed: Result<RemoteInfo, _> = serde_json::from_str("[1, 2, 3]");
        assert!(parsed.is_err());
    }
}
