//! Application state shared across handlers

use crate::assembler::Assembler;
use crate::catalog::CatalogStore;
use crate::config::Settings;
use crate::directory::{DirectoryClient, RemoteInfoCache};
use crate::links::HostContext;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Result set assembler
    pub assembler: Arc<Assembler>,
    /// Cached directory metadata
    pub remote: Arc<RemoteInfoCache>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, catalog: CatalogStore) -> anyhow::Result<Self> {
        let client = DirectoryClient::new(&settings.outgoing)?;
        let remote = Arc::new(RemoteInfoCache::new(client, settings.directory.clone()));
        let assembler = Arc::new(Assembler::new(catalog, settings.vendor.clone()));

        Ok(Self {
            settings: Arc::new(settings),
            assembler,
            remote,
        })
    }

    /// Host context for link resolution, with the caller's network-admin
    /// flag applied.
    pub fn host_context(&self, network_admin: bool) -> HostContext {
        HostContext {
            host_version: self.settings.server.host_version.clone(),
            runtime_version: self.settings.server.runtime_version.clone(),
            network_admin,
            activation_base_url: self.settings.server.activation_base_url.clone(),
        }
    }
}
