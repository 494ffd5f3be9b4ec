//! JSON API: route table listing and navigation dry-runs.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::nav::{CookieSessionReader, Navigation, RouteDefinition};
use crate::state::AppState;

/// `GET /api/routes` — the route table in order.
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteDefinition>> {
    Json(state.navigator.table().routes().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    to: String,
    from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStatus {
    Arrived,
    NotFound,
}

/// Outcome of a navigation as seen by the current request's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationReport {
    pub requested: String,
    pub status: NavigationStatus,
    /// Final path (the normalized request path when not found).
    pub path: String,
    pub name: Option<String>,
    pub redirects: Vec<String>,
}

impl NavigationReport {
    fn new(requested: &str, navigation: Navigation<'_>) -> Self {
        match navigation {
            Navigation::Arrived { route, redirects } => Self {
                requested: requested.to_owned(),
                status: NavigationStatus::Arrived,
                path: route.path.clone(),
                name: Some(route.name.clone()),
                redirects,
            },
            Navigation::NotFound { path } => Self {
                requested: requested.to_owned(),
                status: NavigationStatus::NotFound,
                path,
                name: None,
                redirects: Vec::new(),
            },
        }
    }
}

/// `GET /api/navigate?to=&from=` — resolve a navigation without performing it.
pub async fn navigate(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigationReport>, (StatusCode, String)> {
    let reader = CookieSessionReader::new(&jar, &state.session_cookie);
    state
        .navigator
        .navigate(&query.to, query.from.as_deref(), &reader)
        .map(|nav| Json(NavigationReport::new(&query.to, nav)))
        .map_err(|e| {
            tracing::error!(to = %query.to, error = %e, "navigation dry-run failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}
