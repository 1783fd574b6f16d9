//! Addon-Suggest service entry point

use addon_suggest::{
    catalog::CatalogStore,
    config::Settings,
    web::{create_router, AppState},
};
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    info!("Starting addon-suggest v{}", addon_suggest::VERSION);

    // Load configuration
    let settings = load_settings()?;
    info!("Serving suggestions for vendor: {}", settings.vendor.name);

    // Create application state
    let catalog = CatalogStore::default();
    info!("Loaded {} catalog entries", catalog.len());

    let state = AppState::new(settings.clone(), catalog)?;

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("ADDON_SUGGEST_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try default paths
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
