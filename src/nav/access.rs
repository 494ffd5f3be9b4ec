//! Access tags attached to route records.

use serde::{Deserialize, Serialize};

/// Who may enter a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTag {
    /// Open to everyone.
    #[default]
    None,
    /// Only for logged-in users.
    RequiredAuth,
    /// Only for logged-out users (login page and friends).
    DeniedForAuth,
}

impl AccessTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::RequiredAuth => "required_auth",
            Self::DeniedForAuth => "denied_for_auth",
        }
    }
}

impl std::fmt::Display for AccessTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "access_test.rs"]
mod tests;
