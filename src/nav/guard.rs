//! Pre-navigation access guard.
//!
//! DESIGN
//! ======
//! The decision itself is a pure function of the matched access tags and the
//! session snapshot. The guard hands that decision back through a [`Next`]
//! continuation that is consumed on use; a [`GuardOutcome`] can only be
//! produced by consuming `Next`, so every guard invocation signals exactly
//! once.
//!
//! `RequiredAuth` is checked before `DeniedForAuth`. A chain carrying both
//! redirects an unauthenticated visitor to login and stops there.

use super::access::AccessTag;
use super::session::Session;
use super::table::RouteMatch;

/// Default redirect target when authentication is required.
pub const DEFAULT_LOGIN_PATH: &str = "/";
/// Default redirect target for signed-in users hitting a visitors-only route.
pub const DEFAULT_LANDING_PATH: &str = "/participant";

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(String),
}

/// One navigation attempt presented to the guard.
#[derive(Debug, Clone)]
pub struct NavigationRequest<'a> {
    pub to: RouteMatch<'a>,
    pub from: Option<RouteMatch<'a>>,
}

/// Continuation handed to the guard. Consumed by the first call.
#[must_use = "a guard must resolve the navigation by calling proceed or redirect"]
#[derive(Debug)]
pub struct Next {
    _private: (),
}

impl Next {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    pub fn proceed(self) -> GuardOutcome {
        GuardOutcome(Decision::Proceed)
    }

    pub fn redirect(self, path: impl Into<String>) -> GuardOutcome {
        GuardOutcome(Decision::Redirect(path.into()))
    }

    pub fn resolve(self, decision: Decision) -> GuardOutcome {
        GuardOutcome(decision)
    }
}

/// The single signal emitted by a guard for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome(Decision);

impl GuardOutcome {
    #[must_use]
    pub fn decision(&self) -> &Decision {
        &self.0
    }

    #[must_use]
    pub fn into_decision(self) -> Decision {
        self.0
    }
}

/// Authentication gate run before every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    login_path: String,
    landing_path: String,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_LANDING_PATH)
    }
}

impl AccessGuard {
    #[must_use]
    pub fn new(login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self { login_path: login_path.into(), landing_path: landing_path.into() }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decide over the access tags of a matched chain.
    pub fn decide<I>(&self, tags: I, session: &Session) -> Decision
    where
        I: IntoIterator<Item = AccessTag>,
    {
        let (mut required, mut denied) = (false, false);
        for tag in tags {
            match tag {
                AccessTag::RequiredAuth => required = true,
                AccessTag::DeniedForAuth => denied = true,
                AccessTag::None => {}
            }
        }

        let authenticated = session.is_authenticated();
        if required && !authenticated {
            return Decision::Redirect(self.login_path.clone());
        }
        if denied && authenticated {
            return Decision::Redirect(self.landing_path.clone());
        }
        Decision::Proceed
    }

    /// Run the guard for one navigation, resolving `next` exactly once.
    pub fn before_each(&self, request: &NavigationRequest<'_>, session: &Session, next: Next) -> GuardOutcome {
        let decision = self.decide(request.to.access_tags(), session);
        let tags = request.to.access_tags().map(|tag| tag.to_string()).collect::<Vec<_>>().join(",");
        tracing::debug!(
            to = request.to.path(),
            tags = %tags,
            from = request.from.as_ref().map(RouteMatch::path),
            authenticated = session.is_authenticated(),
            ?decision,
            "navigation guard"
        );
        next.resolve(decision)
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
