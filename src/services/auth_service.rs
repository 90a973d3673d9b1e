use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;

use crate::api::{ApiError, HttpClient};
use crate::models::{Role, Session, User};
use crate::session::{SessionChange, SessionSnapshot, SessionStore};

/// Login request payload
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response from API
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Login, logout and session reads over one `SessionStore`
#[derive(Clone)]
pub struct AuthService {
    client: HttpClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(client: HttpClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Log in and persist the issued token and user
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        tracing::debug!("Logging in as {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.client.post("/login", &request).await?;
        let session = Session {
            token: response.access_token,
            user: response.user,
        };

        self.session.establish(&session)?;
        tracing::info!("Successfully logged in as {}", session.user.name);

        Ok(session)
    }

    /// Create an account; does not log in
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        tracing::debug!("Registering {}", request.email);
        self.client.post("/register", request).await
    }

    /// Invalidate the token server-side if possible, then always clear it
    /// locally
    pub async fn logout(&self) {
        if let Err(e) = self.client.post_empty("/logout").await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.session.clear(SessionChange::LoggedOut);
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn has_role(&self, required: &[Role]) -> bool {
        self.session.has_role(required)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }
}
