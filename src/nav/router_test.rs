use super::*;
use crate::nav::access::AccessTag;
use crate::nav::session::Session;
use crate::nav::table::ViewRef;

fn portal() -> Navigator {
    Navigator::new(RouteTable::default_portal(), AccessGuard::default())
}

fn authed() -> Session {
    Session::Authenticated { token: "abc".into() }
}

fn arrived_at(nav: &Navigation<'_>) -> (String, Vec<String>) {
    match nav {
        Navigation::Arrived { route, redirects } => (route.path.clone(), redirects.clone()),
        Navigation::NotFound { path } => panic!("expected arrival, got not found for {path}"),
    }
}

// =============================================================================
// navigate — portal scenarios
// =============================================================================

#[test]
fn logged_out_participant_lands_on_login() {
    let navigator = portal();
    let nav = navigator.navigate("/participant", None, &Session::Unauthenticated).unwrap();
    assert_eq!(arrived_at(&nav), ("/".to_owned(), vec!["/".to_owned()]));
    assert!(nav.redirected());
}

#[test]
fn logged_in_login_lands_on_participant() {
    let navigator = portal();
    let nav = navigator.navigate("/", None, &authed()).unwrap();
    assert_eq!(arrived_at(&nav), ("/participant".to_owned(), vec!["/participant".to_owned()]));
}

#[test]
fn logged_in_participant_proceeds() {
    let navigator = portal();
    let nav = navigator.navigate("/participant", Some("/"), &authed()).unwrap();
    assert_eq!(arrived_at(&nav), ("/participant".to_owned(), Vec::new()));
    assert!(!nav.redirected());
}

#[test]
fn logged_out_login_proceeds() {
    let navigator = portal();
    let nav = navigator.navigate("/", None, &Session::Unauthenticated).unwrap();
    assert_eq!(arrived_at(&nav), ("/".to_owned(), Vec::new()));
}

#[test]
fn unknown_path_is_not_found() {
    let navigator = portal();
    let nav = navigator.navigate("/about/?x=1", None, &authed()).unwrap();
    assert_eq!(nav, Navigation::NotFound { path: "/about".into() });
    assert!(!nav.redirected());
}

#[test]
fn navigate_is_repeatable() {
    let navigator = portal();
    let a = navigator.navigate("/participant", None, &Session::Unauthenticated).unwrap();
    let b = navigator.navigate("/participant", None, &Session::Unauthenticated).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// navigate — redirect failures
// =============================================================================

#[test]
fn cyclic_guard_targets_are_a_loop() {
    // Login itself requires auth, so a logged-out visitor never settles.
    let table = RouteTable::new(vec![
        RouteDefinition::new("/login", "login", AccessTag::RequiredAuth, ViewRef::new("login")),
        RouteDefinition::new("/home", "home", AccessTag::RequiredAuth, ViewRef::new("home")),
    ])
    .unwrap();
    let navigator = Navigator::new(table, AccessGuard::new("/login", "/home"));
    let err = navigator.navigate("/home", None, &Session::Unauthenticated).unwrap_err();
    match err {
        NavigationError::RedirectLoop { limit, trail } => {
            assert_eq!(limit, MAX_REDIRECTS);
            assert_eq!(trail.len(), MAX_REDIRECTS + 1);
            assert!(trail.iter().all(|p| p == "/login"));
        }
        other => panic!("expected redirect loop, got {other:?}"),
    }
}

#[test]
fn redirect_to_missing_route_fails() {
    let navigator = Navigator::new(RouteTable::default_portal(), AccessGuard::new("/signin", "/participant"));
    let err = navigator.navigate("/participant", None, &Session::Unauthenticated).unwrap_err();
    assert!(matches!(err, NavigationError::UnknownRedirect(p) if p == "/signin"));
}

// =============================================================================
// navigate_named
// =============================================================================

#[test]
fn navigate_named_resolves_path() {
    let navigator = portal();
    let nav = navigator.navigate_named("participant", None, &authed()).unwrap();
    assert_eq!(arrived_at(&nav).0, "/participant");
}

#[test]
fn navigate_named_runs_guard() {
    let navigator = portal();
    let nav = navigator.navigate_named("participant", None, &Session::Unauthenticated).unwrap();
    assert_eq!(arrived_at(&nav).0, "/");
}

#[test]
fn navigate_named_unknown_name() {
    let navigator = portal();
    let err = navigator.navigate_named("note", None, &authed()).unwrap_err();
    assert!(matches!(err, NavigationError::UnknownRouteName(n) if n == "note"));
}

#[test]
fn redirect_loop_error_message_lists_trail() {
    let err = NavigationError::RedirectLoop { limit: 2, trail: vec!["/a".into(), "/b".into(), "/a".into()] };
    assert_eq!(err.to_string(), "redirect loop after 2 hops: /a -> /b -> /a");
}
