//! HTTP request handlers

use super::state::AppState;
use crate::assembler::{self, BrowseArgs, ResultPage, SearchArgs, Tab};
use crate::links::{self, Capabilities, InstallState, LinkSet};
use crate::record::NormalizedRecord;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

fn default_screen() -> String {
    assembler::PLUGIN_INSTALL_SCREEN.to_string()
}

/// Request body for the search result filter
#[derive(Debug, Deserialize)]
pub struct SearchFilterRequest {
    /// Identified host screen; behavior attaches only on plugin-install
    #[serde(default = "default_screen")]
    pub screen: String,
    #[serde(default)]
    pub args: SearchArgs,
    pub page: ResultPage,
}

/// Request body for the browse result filter
#[derive(Debug, Deserialize)]
pub struct BrowseFilterRequest {
    #[serde(default = "default_screen")]
    pub screen: String,
    pub args: BrowseArgs,
    pub page: ResultPage,
}

/// Request body for the action link filter
#[derive(Debug, Deserialize)]
pub struct ActionLinksRequest {
    pub record: NormalizedRecord,
    /// The host's default links, passed through for foreign records
    #[serde(default)]
    pub links: LinkSet,
    pub state: InstallState,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub network_admin: bool,
}

/// Request body for building vendor tab args
#[derive(Debug, Deserialize)]
pub struct TabArgsRequest {
    #[serde(default)]
    pub page: u32,
    pub locale: String,
    #[serde(default)]
    pub installed_plugins: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Filter a directory search result page, injecting at most one suggestion.
pub async fn filter_search_results(
    State(state): State<AppState>,
    Json(req): Json<SearchFilterRequest>,
) -> Json<ResultPage> {
    if !assembler::is_plugin_install_screen(&req.screen) {
        return Json(req.page);
    }

    let remote = state.remote.get().await.ok();
    let page = state
        .assembler
        .inject_suggestion(&req.args, remote.as_ref(), req.page);

    Json(page)
}

/// Filter a browse result page, replacing vendor-scoped results with the
/// catalog.
pub async fn filter_browse_results(
    State(state): State<AppState>,
    Json(req): Json<BrowseFilterRequest>,
) -> Json<ResultPage> {
    if !assembler::is_plugin_install_screen(&req.screen) {
        return Json(req.page);
    }

    let remote = state.remote.get().await.ok();
    let page = state
        .assembler
        .catalog_page(&req.args, remote.as_ref(), req.page);

    Json(page)
}

/// Filter the action links for one result card.
pub async fn filter_action_links(
    State(state): State<AppState>,
    Json(req): Json<ActionLinksRequest>,
) -> Json<LinkSet> {
    let ctx = state.host_context(req.network_admin);
    let links = links::resolve_links(
        state.assembler.catalog(),
        state.assembler.vendor(),
        &req.record,
        req.links,
        &req.state,
        req.capabilities,
        &ctx,
    );

    Json(links)
}

/// Append the vendor tab to the host's browse tab list.
pub async fn filter_tabs(
    State(state): State<AppState>,
    Json(tabs): Json<Vec<Tab>>,
) -> Json<Vec<Tab>> {
    Json(state.assembler.tabs(tabs))
}

/// Build the query args for the vendor browse tab.
pub async fn tab_args(
    State(state): State<AppState>,
    Json(req): Json<TabArgsRequest>,
) -> Json<BrowseArgs> {
    Json(
        state
            .assembler
            .tab_args(req.page, &req.locale, req.installed_plugins),
    )
}

/// Strings shown beside an injected suggestion card.
pub async fn notice(State(state): State<AppState>) -> Json<assembler::SuggestionNotice> {
    Json(state.assembler.notice())
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}
