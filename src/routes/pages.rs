//! Page routes: guarded history-mode navigation.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::join_base;
use crate::nav::{CookieSessionReader, Navigation, RouteDefinition};
use crate::state::AppState;

/// Response header carrying the name of the rendered route.
pub const ROUTE_NAME_HEADER: &str = "x-route-name";

/// `GET <route path>` — run the guard, then serve the shell or redirect.
pub async fn page(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let Some(path) = super::strip_base(&state.base_url, uri.path()) else {
        return shell_response(&state, StatusCode::NOT_FOUND, None);
    };

    let reader = CookieSessionReader::new(&jar, &state.session_cookie);
    match state.navigator.navigate(path, None, &reader) {
        Ok(Navigation::Arrived { route, redirects }) if redirects.is_empty() => {
            shell_response(&state, StatusCode::OK, Some(route))
        }
        Ok(Navigation::Arrived { route, redirects }) => {
            tracing::info!(from = path, to = %route.path, hops = redirects.len(), "navigation redirected");
            Redirect::temporary(&join_base(&state.base_url, &route.path)).into_response()
        }
        Ok(Navigation::NotFound { .. }) => shell_response(&state, StatusCode::NOT_FOUND, None),
        Err(e) => {
            tracing::error!(path, error = %e, "navigation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "navigation failed").into_response()
        }
    }
}

/// Last-resort fallback: the shell with a 404 so the SPA renders its own not-found view.
pub async fn not_found(State(state): State<AppState>) -> Response {
    shell_response(&state, StatusCode::NOT_FOUND, None)
}

fn shell_response(state: &AppState, status: StatusCode, route: Option<&RouteDefinition>) -> Response {
    let mut response = (status, Html(state.shell.to_string())).into_response();
    let Some(route) = route else {
        return response;
    };

    let headers = response.headers_mut();
    if let Ok(name) = HeaderValue::from_str(&route.name) {
        headers.insert(ROUTE_NAME_HEADER, name);
    }
    let chunk = join_base(&state.base_url, &format!("/{}", route.view.asset_path()));
    if let Ok(link) = HeaderValue::from_str(&format!("<{chunk}>; rel=preload; as=script")) {
        headers.insert(header::LINK, link);
    }
    response
}
