//! Navigator: the application's router object.
//!
//! ARCHITECTURE
//! ============
//! Built once by the bootstrap and shared behind an `Arc`; there is no
//! process-wide router. A navigation takes one session snapshot, resolves
//! the target, runs the guard and follows its redirects until the guard
//! lets the navigation through.

use super::guard::{AccessGuard, Decision, NavigationRequest, Next};
use super::session::SessionReader;
use super::table::{RouteDefinition, RouteTable, normalize_path};

/// Redirect hops followed before a navigation is declared a loop.
pub const MAX_REDIRECTS: usize = 8;

/// Errors produced while resolving a navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The guard kept redirecting.
    #[error("redirect loop after {limit} hops: {}", .trail.join(" -> "))]
    RedirectLoop { limit: usize, trail: Vec<String> },

    /// The guard redirected to a path with no route.
    #[error("guard redirected to unknown path: {0}")]
    UnknownRedirect(String),

    /// Named navigation to a name with no route.
    #[error("unknown route name: {0}")]
    UnknownRouteName(String),
}

/// Final result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    /// The guard let the navigation through at `route`, after following `redirects`.
    Arrived { route: &'a RouteDefinition, redirects: Vec<String> },
    /// No route matches the requested path.
    NotFound { path: String },
}

impl Navigation<'_> {
    #[must_use]
    pub fn redirected(&self) -> bool {
        matches!(self, Self::Arrived { redirects, .. } if !redirects.is_empty())
    }
}

/// Route table plus guard, driving every navigation.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    guard: AccessGuard,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable, guard: AccessGuard) -> Self {
        Self { table, guard }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Navigate to `to`, coming from `from`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] when the guard redirects to an unknown
    /// path or keeps redirecting past [`MAX_REDIRECTS`].
    pub fn navigate(
        &self,
        to: &str,
        from: Option<&str>,
        sessions: &dyn SessionReader,
    ) -> Result<Navigation<'_>, NavigationError> {
        let session = sessions.read_session();
        let from = from.and_then(|p| self.table.lookup(p));

        let Some(mut target) = self.table.lookup(to) else {
            tracing::debug!(path = to, "no route matched");
            return Ok(Navigation::NotFound { path: normalize_path(to).to_owned() });
        };

        let mut redirects = Vec::new();
        loop {
            let request = NavigationRequest { to: target, from: from.clone() };
            match self.guard.before_each(&request, &session, Next::new()).into_decision() {
                Decision::Proceed => {
                    return Ok(Navigation::Arrived { route: request.to.route(), redirects });
                }
                Decision::Redirect(path) => {
                    if redirects.len() >= MAX_REDIRECTS {
                        redirects.push(path);
                        tracing::warn!(trail = ?redirects, "navigation redirect loop");
                        return Err(NavigationError::RedirectLoop { limit: MAX_REDIRECTS, trail: redirects });
                    }
                    target = self
                        .table
                        .lookup(&path)
                        .ok_or_else(|| NavigationError::UnknownRedirect(path.clone()))?;
                    redirects.push(path);
                }
            }
        }
    }

    /// Navigate to the route called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownRouteName`] if no route has that
    /// name, otherwise as [`Navigator::navigate`].
    pub fn navigate_named(
        &self,
        name: &str,
        from: Option<&str>,
        sessions: &dyn SessionReader,
    ) -> Result<Navigation<'_>, NavigationError> {
        let route = self
            .table
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownRouteName(name.to_owned()))?;
        self.navigate(&route.path, from, sessions)
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
