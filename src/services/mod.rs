// Resource services: one per backend entity plus authentication

pub mod athlete_service;
pub mod auth_service;
pub mod coach_service;
pub mod sport_service;

pub use athlete_service::AthleteService;
pub use auth_service::{AuthService, LoginRequest, LoginResponse, RegisterRequest};
pub use coach_service::CoachService;
pub use sport_service::SportService;

use std::future::Future;

use crate::api::{ApiError, HttpClient};
use crate::config::Config;
use crate::session::SessionStore;

/// CRUD surface shared by the entity services
pub trait ResourceService: Clone + Send + Sync {
    type Entity: Send;
    type Draft: Send + Sync;

    fn list(&self) -> impl Future<Output = Result<Vec<Self::Entity>, ApiError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;

    fn create(
        &self,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;

    fn update(
        &self,
        id: i64,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Every service, sharing one HTTP client and session
#[derive(Clone)]
pub struct Services {
    pub sports: SportService,
    pub athletes: AthleteService,
    pub coaches: CoachService,
    pub auth: AuthService,
}

impl Services {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self, ApiError> {
        let client = HttpClient::new(&config.api, session.clone())?;

        Ok(Self {
            sports: SportService::new(client.clone()),
            athletes: AthleteService::new(client.clone()),
            coaches: CoachService::new(client.clone()),
            auth: AuthService::new(client, session),
        })
    }
}

/// Reject ids that cannot name a record before any request is made
pub fn ensure_valid_id(id: i64) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::InvalidId(id.to_string()))
    }
}

/// Parse a route or command-line id
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
        .and_then(ensure_valid_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_validation() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 3 ").unwrap(), 3);
        assert!(matches!(parse_id("0"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("-4"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
    }
}
