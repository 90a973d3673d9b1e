mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sports_console::api::ApiError;
use sports_console::models::Role;
use sports_console::services::{RegisterRequest, Services};
use sports_console::session::{
    FileStore, KeyValueStore, SessionChange, SessionStore, TOKEN_KEY, USER_KEY,
};

use common::{config_for, session_as, unreachable_config};

#[tokio::test]
async fn test_login_with_test_user_persists_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "email": "test@test.com", "password": "password" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fake-token",
            "user": { "id": 1, "name": "Test User", "role": "user" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let services = Services::new(&config_for(&server), session.clone()).unwrap();

    let logged_in = services
        .auth
        .login("test@test.com", "password")
        .await
        .unwrap();

    assert_eq!(logged_in.token, "fake-token");
    assert_eq!(services.auth.token().as_deref(), Some("fake-token"));
    assert!(services.auth.is_authenticated());
    assert_eq!(logged_in.user.id, 1);
    assert_eq!(logged_in.user.name, "Test User");
    assert_eq!(services.auth.current_user().map(|u| u.role), Some(Role::User));
    assert!(services.auth.has_role(&[]));
    assert!(services.auth.has_role(&[Role::User]));
    assert!(!services.auth.has_role(&[Role::Admin, Role::Manager]));
    assert_eq!(session.snapshot().last_change, Some(SessionChange::LoggedIn));
}

#[tokio::test]
async fn test_login_accepts_enveloped_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "access_token": "wrapped-token",
                "user": { "id": 2, "name": "Manager", "role": "manager" }
            }
        })))
        .mount(&server)
        .await;

    let services = Services::new(&config_for(&server), SessionStore::in_memory()).unwrap();
    let session = services.auth.login("m@example.com", "pw").await.unwrap();

    assert_eq!(session.token, "wrapped-token");
    assert_eq!(session.user.role, Role::Manager);
}

#[tokio::test]
async fn test_rejected_login_leaves_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let services = Services::new(&config_for(&server), SessionStore::in_memory()).unwrap();
    let result = services.auth.login("x@example.com", "wrong").await;

    assert_matches!(result, Err(ApiError::SessionExpired(_)));
    assert!(!services.auth.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_session_even_when_backend_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .and(header("authorization", "Bearer fake-token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_as(Role::User);
    let services = Services::new(&config_for(&server), session.clone()).unwrap();
    assert!(services.auth.is_authenticated());

    services.auth.logout().await;

    assert!(!services.auth.is_authenticated());
    assert!(services.auth.current_user().is_none());
    assert_eq!(session.snapshot().last_change, Some(SessionChange::LoggedOut));
}

#[tokio::test]
async fn test_logout_clears_session_when_backend_is_down() {
    let session = session_as(Role::Admin);
    let services = Services::new(&unreachable_config(), session.clone()).unwrap();

    services.auth.logout().await;

    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_register_returns_payload_without_logging_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "data": { "id": 5, "name": "New", "role": "user" } })),
        )
        .mount(&server)
        .await;

    let services = Services::new(&config_for(&server), SessionStore::in_memory()).unwrap();
    let request = RegisterRequest {
        name: "New".to_string(),
        email: "new@example.com".to_string(),
        password: "pw123456".to_string(),
        password_confirmation: "pw123456".to_string(),
    };

    let payload = services.auth.register(&request).await.unwrap();
    assert_eq!(payload["id"], 5);
    assert!(!services.auth.is_authenticated());
}

#[test]
fn test_role_checks_follow_session() {
    let session = SessionStore::in_memory();
    assert!(!session.is_authenticated());
    assert!(!session.has_role(&[]));

    let session = session_as(Role::User);
    assert!(session.has_role(&[]));
    assert!(!session.has_role(&[Role::Admin, Role::Manager]));
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = SessionStore::open(Arc::new(FileStore::open(&path).unwrap()));
        store
            .establish(&sports_console::models::Session {
                token: "persisted".to_string(),
                user: common::user(Role::Manager),
            })
            .unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("persisted"));
    assert!(reopened.get(USER_KEY).is_some());

    let store = SessionStore::open(Arc::new(reopened));
    assert!(store.snapshot().is_authenticated());
    assert_eq!(store.current_user().map(|u| u.role), Some(Role::Manager));
}
