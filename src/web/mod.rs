//! Web server module
//!
//! Maps the host's hook points onto a small JSON API: filter a search
//! result page, filter a browse page, filter a card's action links, extend
//! the browse tab list and build the vendor tab args.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
