mod common;

use pretty_assertions::assert_eq;
use std::sync::Arc;

use sports_console::guard::{GuardDecision, Navigation, Navigator, Route, RouteGuard, ACCESS_DENIED};
use sports_console::models::{Role, Session};
use sports_console::session::{KeyValueStore, MemoryStore, SessionStore, TOKEN_KEY};

use common::{session_as, user};

#[test]
fn test_guard_waits_for_restore() {
    let store = SessionStore::new(Arc::new(MemoryStore::new()));
    let guard = RouteGuard::authenticated();
    assert_eq!(guard.check(&store.snapshot()), GuardDecision::Loading);

    store.restore();
    assert_eq!(guard.check(&store.snapshot()), GuardDecision::RedirectToLogin);
}

#[test]
fn test_management_guard_denies_plain_users_inline() {
    let guard = RouteGuard::with_roles(&Role::MANAGERS);

    let decision = guard.check(&session_as(Role::User).snapshot());
    assert_eq!(decision, GuardDecision::Denied(ACCESS_DENIED.to_string()));

    assert!(guard.check(&session_as(Role::Admin).snapshot()).is_allowed());
    assert!(guard.check(&session_as(Role::Manager).snapshot()).is_allowed());
}

#[test]
fn test_navigation_follows_login_and_expiry() {
    let store = SessionStore::in_memory();
    let mut nav = Navigator::new();

    let outcome = nav.navigate(Route::Coaches, &store.snapshot());
    assert_eq!(
        outcome,
        Navigation::Redirected {
            from: Route::Coaches,
            to: Route::Login
        }
    );

    store
        .establish(&Session {
            token: "fake-token".to_string(),
            user: user(Role::User),
        })
        .unwrap();
    assert_eq!(
        nav.on_session_change(&store.snapshot()),
        Some(Navigation::Show(Route::Coaches))
    );

    store.expire();
    assert_eq!(
        nav.on_session_change(&store.snapshot()),
        Some(Navigation::Redirected {
            from: Route::Coaches,
            to: Route::Login
        })
    );
    assert_eq!(nav.current(), Route::Login);
}

#[test]
fn test_public_routes_need_no_session() {
    let store = SessionStore::in_memory();
    let mut nav = Navigator::new();

    for route in [Route::Home, Route::About, Route::Login, Route::Register] {
        assert_eq!(nav.navigate(route, &store.snapshot()), Navigation::Show(route));
    }
}

#[test]
fn test_stored_token_without_user_reaches_entity_pages() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(TOKEN_KEY, "fake-token").unwrap();
    let store = SessionStore::open(storage);

    assert!(store.is_authenticated());
    assert!(store.has_role(&[]));
    assert!(!store.has_role(&Role::MANAGERS));

    let mut nav = Navigator::new();
    assert_eq!(
        nav.navigate(Route::Sports, &store.snapshot()),
        Navigation::Show(Route::Sports)
    );
    assert_eq!(
        RouteGuard::with_roles(&Role::MANAGERS).check(&store.snapshot()),
        GuardDecision::Denied(ACCESS_DENIED.to_string())
    );
}
