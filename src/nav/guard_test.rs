use super::*;
use crate::nav::table::RouteTable;

fn authed() -> Session {
    Session::Authenticated { token: "abc".into() }
}

fn all_sessions() -> [Session; 2] {
    [authed(), Session::Unauthenticated]
}

// =============================================================================
// decide — decision table
// =============================================================================

#[test]
fn required_auth_without_session_redirects_to_login() {
    let guard = AccessGuard::default();
    assert_eq!(
        guard.decide([AccessTag::RequiredAuth], &Session::Unauthenticated),
        Decision::Redirect("/".into())
    );
}

#[test]
fn required_auth_with_session_proceeds() {
    let guard = AccessGuard::default();
    assert_eq!(guard.decide([AccessTag::RequiredAuth], &authed()), Decision::Proceed);
}

#[test]
fn denied_for_auth_with_session_redirects_to_landing() {
    let guard = AccessGuard::default();
    assert_eq!(guard.decide([AccessTag::DeniedForAuth], &authed()), Decision::Redirect("/participant".into()));
}

#[test]
fn denied_for_auth_without_session_proceeds() {
    let guard = AccessGuard::default();
    assert_eq!(guard.decide([AccessTag::DeniedForAuth], &Session::Unauthenticated), Decision::Proceed);
}

#[test]
fn untagged_always_proceeds() {
    let guard = AccessGuard::default();
    for session in all_sessions() {
        assert_eq!(guard.decide([AccessTag::None], &session), Decision::Proceed);
        assert_eq!(guard.decide(std::iter::empty(), &session), Decision::Proceed);
    }
}

#[test]
fn user_without_token_counts_as_logged_out() {
    let guard = AccessGuard::default();
    let session = Session::from_user(Some(crate::nav::session::User { token: None }));
    assert_eq!(guard.decide([AccessTag::RequiredAuth], &session), Decision::Redirect("/".into()));
    assert_eq!(guard.decide([AccessTag::DeniedForAuth], &session), Decision::Proceed);
}

// =============================================================================
// decide — tie-break
// =============================================================================

#[test]
fn both_tags_unauthenticated_redirects_to_login_only() {
    let guard = AccessGuard::default();
    let decision = guard.decide([AccessTag::DeniedForAuth, AccessTag::RequiredAuth], &Session::Unauthenticated);
    assert_eq!(decision, Decision::Redirect("/".into()));
}

#[test]
fn both_tags_authenticated_redirects_to_landing() {
    let guard = AccessGuard::default();
    let decision = guard.decide([AccessTag::RequiredAuth, AccessTag::DeniedForAuth], &authed());
    assert_eq!(decision, Decision::Redirect("/participant".into()));
}

#[test]
fn custom_targets_are_used() {
    let guard = AccessGuard::new("/login", "/home");
    assert_eq!(guard.login_path(), "/login");
    assert_eq!(guard.landing_path(), "/home");
    assert_eq!(
        guard.decide([AccessTag::RequiredAuth], &Session::Unauthenticated),
        Decision::Redirect("/login".into())
    );
    assert_eq!(guard.decide([AccessTag::DeniedForAuth], &authed()), Decision::Redirect("/home".into()));
}

// =============================================================================
// before_each
// =============================================================================

#[test]
fn before_each_scenarios_on_portal_table() {
    let table = RouteTable::default_portal();
    let guard = AccessGuard::default();
    let run = |path: &str, session: &Session| {
        let request = NavigationRequest { to: table.lookup(path).unwrap(), from: None };
        guard.before_each(&request, session, Next::new()).into_decision()
    };

    assert_eq!(run("/participant", &Session::Unauthenticated), Decision::Redirect("/".into()));
    assert_eq!(run("/", &authed()), Decision::Redirect("/participant".into()));
    assert_eq!(run("/participant", &authed()), Decision::Proceed);
    assert_eq!(run("/", &Session::Unauthenticated), Decision::Proceed);
}

#[test]
fn before_each_is_idempotent() {
    let table = RouteTable::default_portal();
    let guard = AccessGuard::default();
    for path in ["/", "/participant"] {
        for session in all_sessions() {
            let request = NavigationRequest { to: table.lookup(path).unwrap(), from: table.lookup("/") };
            let first = guard.before_each(&request, &session, Next::new());
            let second = guard.before_each(&request, &session, Next::new());
            assert_eq!(first, second, "path {path} session {session:?}");
        }
    }
}

#[test]
fn next_resolves_each_variant() {
    assert_eq!(Next::new().proceed().decision(), &Decision::Proceed);
    assert_eq!(Next::new().redirect("/x").into_decision(), Decision::Redirect("/x".into()));
}
