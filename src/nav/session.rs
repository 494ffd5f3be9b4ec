//! Session snapshot read from the client cookie.
//!
//! DESIGN
//! ======
//! The cookie holds the signed-in user serialized as JSON. The reader turns
//! it into a typed [`Session`]; anything short of a user with a non-empty
//! token collapses to [`Session::Unauthenticated`]. Reading never fails.

use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// User entity stored in the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub token: Option<String>,
}

/// Authentication state for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Authenticated { token: String },
    Unauthenticated,
}

impl Session {
    /// Collapse an optional user into a session.
    #[must_use]
    pub fn from_user(user: Option<User>) -> Self {
        match user.and_then(|u| u.token) {
            Some(token) if !token.is_empty() => Self::Authenticated { token },
            _ => Self::Unauthenticated,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Source of session snapshots.
pub trait SessionReader {
    fn read_session(&self) -> Session;
}

impl SessionReader for Session {
    fn read_session(&self) -> Session {
        self.clone()
    }
}

/// Reads the session from a named cookie in a request's cookie jar.
pub struct CookieSessionReader<'a> {
    jar: &'a CookieJar,
    cookie_name: &'a str,
}

impl<'a> CookieSessionReader<'a> {
    #[must_use]
    pub fn new(jar: &'a CookieJar, cookie_name: &'a str) -> Self {
        Self { jar, cookie_name }
    }
}

impl SessionReader for CookieSessionReader<'_> {
    fn read_session(&self) -> Session {
        Session::from_user(read_user(self.jar, self.cookie_name))
    }
}

/// Deserialize the user stored in cookie `name`.
///
/// A missing cookie or a value that is not a JSON user yields `None`.
#[must_use]
pub fn read_user(jar: &CookieJar, name: &str) -> Option<User> {
    let raw = jar.get(name)?.value();
    match serde_json::from_str::<User>(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(cookie = name, error = %e, "malformed session cookie");
            None
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
