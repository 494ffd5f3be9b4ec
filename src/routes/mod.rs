//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! History-mode serving for the portal SPA. Every path in the route table is
//! bound to the page handler, which runs the navigation guard against the
//! request's cookies before answering with the shell or a redirect. API
//! routes expose the table and dry-run navigations. Everything else is
//! served from the SPA build directory, with a not-found shell as the last
//! resort.

pub mod api;
pub mod pages;

use axum::Router;
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the HTTP app for `state`.
pub fn app(state: AppState) -> Router {
    let base = state.base_url.clone();

    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route(&join_base(&base, "/api/routes"), get(api::list_routes))
        .route(&join_base(&base, "/api/navigate"), get(api::navigate));

    for route in state.navigator.table() {
        let path = join_base(&base, &route.path);
        router = router.route(&path, get(pages::page));
        if path != "/" {
            router = router.route(&format!("{path}/"), get(pages::page));
        }
    }

    let static_files = ServeDir::new(&state.dist_dir).not_found_service(pages::not_found.with_state(state.clone()));

    router
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Prefix an app path with the mount point.
#[must_use]
pub fn join_base(base: &str, path: &str) -> String {
    match (base, path) {
        ("/", _) => path.to_owned(),
        (_, "/") => base.to_owned(),
        _ => format!("{base}{path}"),
    }
}

/// Strip the mount point from a request path. `None` if the path lies outside it.
#[must_use]
pub fn strip_base<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    if base == "/" {
        return Some(path);
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
