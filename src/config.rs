//! Runtime configuration parsed from environment variables.
//!
//! All settings have defaults matching the participant portal, so an empty
//! environment serves the built-in route table on port 3000.

use std::path::PathBuf;

use crate::nav::guard::{DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH};
use crate::nav::session::DEFAULT_SESSION_COOKIE;
use crate::nav::table::{RouteTable, RouteTableError, has_capture_syntax, is_reserved, normalize_path};
use crate::nav::{AccessGuard, Navigator};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "/";
pub const DEFAULT_DIST_DIR: &str = "dist";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid BASE_URL '{0}': expected an absolute path without query, fragment, captures or reserved prefixes")]
    InvalidBaseUrl(String),

    #[error("cannot read routes file {}: {source}", .path.display())]
    RoutesFile { path: PathBuf, source: std::io::Error },

    #[error("route table: {0}")]
    Table(#[from] RouteTableError),

    /// A guard redirect target has no route in the table.
    #[error("{role} path '{path}' has no route in the table")]
    MissingGuardTarget { role: &'static str, path: String },
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Mount point of the app, normalized (`/` or `/prefix`).
    pub base_url: String,
    pub session_cookie: String,
    pub login_path: String,
    pub landing_path: String,
    /// YAML route table; the built-in portal table when absent.
    pub routes_file: Option<PathBuf>,
    /// SPA build output; `index.html` is the shell.
    pub dist_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_owned(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            landing_path: DEFAULT_LANDING_PATH.to_owned(),
            routes_file: None,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: listen port, default 3000
    /// - `BASE_URL`: mount point, default `/`
    /// - `SESSION_COOKIE`: session cookie name, default `session`
    /// - `LOGIN_PATH`: redirect when auth is required, default `/`
    /// - `LANDING_PATH`: redirect for signed-in users on visitor pages, default `/participant`
    /// - `ROUTES_FILE`: YAML route table
    /// - `DIST_DIR`: SPA build output, default `dist`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` or `BASE_URL` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match env_nonempty("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let base_url = match env_nonempty("BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => defaults.base_url,
        };

        Ok(Self {
            port,
            base_url,
            session_cookie: env_nonempty("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            login_path: env_nonempty("LOGIN_PATH").unwrap_or(defaults.login_path),
            landing_path: env_nonempty("LANDING_PATH").unwrap_or(defaults.landing_path),
            routes_file: env_nonempty("ROUTES_FILE").map(PathBuf::from),
            dist_dir: env_nonempty("DIST_DIR").map_or(defaults.dist_dir, PathBuf::from),
        })
    }

    /// Load the route table and build the navigator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the routes file cannot be read or parsed,
    /// or if a guard redirect target has no route.
    pub fn build_navigator(&self) -> Result<Navigator, ConfigError> {
        let table = match &self.routes_file {
            Some(path) => {
                let src = std::fs::read_to_string(path)
                    .map_err(|source| ConfigError::RoutesFile { path: path.clone(), source })?;
                RouteTable::from_yaml(&src)?
            }
            None => RouteTable::default_portal(),
        };

        for (role, path) in [("login", &self.login_path), ("landing", &self.landing_path)] {
            if table.lookup(path).is_none() {
                return Err(ConfigError::MissingGuardTarget { role, path: path.clone() });
            }
        }

        Ok(Navigator::new(table, AccessGuard::new(self.login_path.clone(), self.landing_path.clone())))
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    if !raw.starts_with('/') || raw.contains(['?', '#']) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    let base = normalize_path(raw);
    if is_reserved(base) || has_capture_syntax(base) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(base.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
