//! Route table: ordered, path-unique route records.
//!
//! DESIGN
//! ======
//! The table is built once at startup and never mutated. It can come from
//! the built-in portal layout or from a YAML file, so disabled routes are
//! dropped from data instead of being commented out in code. Routes do not
//! nest, so a match is always a single-record chain; the chain type is kept
//! so the guard reasons over every matched record the same way.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::access::AccessTag;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while building a route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    /// A path is not in normalized form (leading `/`, no trailing `/`, no query or fragment).
    #[error("invalid route path '{0}': expected a normalized absolute path")]
    InvalidPath(String),

    /// A path shadows an HTTP endpoint or uses capture syntax.
    #[error("reserved route path '{0}': /healthz, /api and ':', '*', '{{', '}}' segments are not allowed")]
    ReservedPath(String),

    /// Two records share a path.
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two records share a name.
    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    /// The YAML source could not be parsed.
    #[error("route table yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =============================================================================
// RECORDS
// =============================================================================

/// Lazily loaded view bundle backing a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef {
    pub chunk: String,
}

impl ViewRef {
    #[must_use]
    pub fn new(chunk: impl Into<String>) -> Self {
        Self { chunk: chunk.into() }
    }

    /// Bundle path relative to the site root, e.g. `js/home.js`.
    #[must_use]
    pub fn asset_path(&self) -> String {
        format!("js/{}.js", self.chunk)
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub access: AccessTag,
    pub view: ViewRef,
}

impl RouteDefinition {
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>, access: AccessTag, view: ViewRef) -> Self {
        Self { path: path.into(), name: name.into(), access, view }
    }
}

/// Records matched for one incoming path, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    matched: Vec<&'a RouteDefinition>,
}

impl<'a> RouteMatch<'a> {
    #[must_use]
    pub fn single(route: &'a RouteDefinition) -> Self {
        Self { matched: vec![route] }
    }

    /// The innermost record, i.e. the one whose view is rendered.
    #[must_use]
    pub fn route(&self) -> &'a RouteDefinition {
        // A match is never built empty.
        self.matched[self.matched.len() - 1]
    }

    #[must_use]
    pub fn matched(&self) -> &[&'a RouteDefinition] {
        &self.matched
    }

    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.route().path
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.route().name
    }

    /// Access tags of every record in the chain.
    pub fn access_tags(&self) -> impl Iterator<Item = AccessTag> + '_ {
        self.matched.iter().map(|r| r.access)
    }
}

// =============================================================================
// TABLE
// =============================================================================

#[derive(Deserialize)]
struct TableFile {
    routes: Vec<RouteDefinition>,
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Build a table, rejecting malformed or colliding records.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] on a non-normalized path, a reserved path,
    /// a duplicate path, or a duplicate name.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RouteTableError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in &routes {
            if !route.path.starts_with('/') || normalize_path(&route.path) != route.path {
                return Err(RouteTableError::InvalidPath(route.path.clone()));
            }
            if is_reserved(&route.path) || has_capture_syntax(&route.path) {
                return Err(RouteTableError::ReservedPath(route.path.clone()));
            }
            if !paths.insert(route.path.as_str()) {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
            if !names.insert(route.name.as_str()) {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
        }
        Ok(Self { routes })
    }

    /// The participant portal layout: a login page for visitors and the
    /// participant home for signed-in users.
    #[must_use]
    pub fn default_portal() -> Self {
        Self {
            routes: vec![
                RouteDefinition::new("/", "login", AccessTag::DeniedForAuth, ViewRef::new("login")),
                RouteDefinition::new("/participant", "participant", AccessTag::RequiredAuth, ViewRef::new("home")),
            ],
        }
    }

    /// Parse a table from YAML of the form `routes: [{path, name, access, view}]`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError::Yaml`] on malformed input, or any
    /// validation error from [`RouteTable::new`].
    pub fn from_yaml(src: &str) -> Result<Self, RouteTableError> {
        let file: TableFile = serde_yaml::from_str(src)?;
        Self::new(file.routes)
    }

    /// Match an incoming path. Query string, fragment and trailing `/` are ignored.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<'_>> {
        let wanted = normalize_path(path);
        self.routes
            .iter()
            .find(|r| r.path == wanted)
            .map(RouteMatch::single)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDefinition> {
        self.routes.iter()
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDefinition;
    type IntoIter = std::slice::Iter<'a, RouteDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Path prefixes served by the HTTP layer itself.
pub const RESERVED_PREFIXES: [&str; 2] = ["/healthz", "/api"];

/// True if `path` is, or lies under, one of [`RESERVED_PREFIXES`].
#[must_use]
pub fn is_reserved(path: &str) -> bool {
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| path.strip_prefix(prefix).is_some_and(|rest| rest.is_empty() || rest.starts_with('/')))
}

/// True if any segment looks like a router capture (`:id`, `*rest`, `{id}`).
/// Lookup matches paths literally, so such a route could never be reached.
#[must_use]
pub fn has_capture_syntax(path: &str) -> bool {
    path.split('/')
        .any(|segment| segment.starts_with([':', '*']) || segment.contains(['{', '}']))
}

/// Strip query, fragment and trailing slashes. An empty result is the root.
#[must_use]
pub fn normalize_path(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
