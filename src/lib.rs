//! Addon-Suggest: add-on suggestion and catalog injection for plugin
//! directory search screens
//!
//! Injects vendor-curated suggestion cards into third-party plugin search
//! results and renders a vendor catalog tab, merging static catalog entries
//! with cached directory metadata into one normalized record shape.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod links;
pub mod matcher;
pub mod record;
pub mod sanitize;
pub mod web;

pub use assembler::{Assembler, ResultPage, SearchArgs};
pub use catalog::{CatalogEntry, CatalogStore};
pub use config::Settings;
pub use directory::{RemoteInfo, RemoteInfoCache};
pub use links::{resolve_links, InstallState, LinkSet};
pub use record::NormalizedRecord;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
