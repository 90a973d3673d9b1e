#![allow(dead_code)]

use serde_json::{json, Value};
use sports_console::config::{ApiConfig, Config, DataConfig};
use sports_console::models::{Role, Session, User};
use sports_console::session::SessionStore;
use wiremock::MockServer;

/// Config whose API points at the mock server
pub fn config_for(server: &MockServer) -> Config {
    config_with_base(&format!("{}/api", server.uri()))
}

/// Config pointing at a port nothing listens on
pub fn unreachable_config() -> Config {
    config_with_base("http://127.0.0.1:1/api")
}

fn config_with_base(base_url: &str) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            storage_url: "http://localhost:8000/storage".to_string(),
            timeout_seconds: 5,
        },
        data: DataConfig { use_mock: false },
    }
}

pub fn user(role: Role) -> User {
    User {
        id: 1,
        name: "Test User".to_string(),
        email: Some("test@example.com".to_string()),
        role,
    }
}

pub fn session_as(role: Role) -> SessionStore {
    let store = SessionStore::in_memory();
    store
        .establish(&Session {
            token: "fake-token".to_string(),
            user: user(role),
        })
        .expect("in-memory session");
    store
}

pub fn sport_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "federation": "FED",
        "description": null,
        "athletes": [],
        "coaches": []
    })
}

pub fn athlete_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "age": 24,
        "category": "Adult",
        "sport_id": 1,
        "sport": { "id": 1, "name": "Football", "federation": "CBF" },
        "coaches": [{ "id": 1, "name": "Carlos Pereira", "sport_id": 1 }]
    })
}

pub fn coach_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "license": "CREF-111-2",
        "specialty": "Technical",
        "sport_id": 1,
        "athletes": []
    })
}
