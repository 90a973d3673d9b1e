use super::{ensure_valid_id, ResourceService};
use crate::api::{ApiError, HttpClient};
use crate::models::{Sport, SportDraft};

#[derive(Clone)]
pub struct SportService {
    client: HttpClient,
}

impl SportService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl ResourceService for SportService {
    type Entity = Sport;
    type Draft = SportDraft;

    async fn list(&self) -> Result<Vec<Sport>, ApiError> {
        tracing::debug!("Fetching all sports");
        self.client
            .get("/sport")
            .await
            .inspect_err(|e| tracing::warn!("Error fetching all sports: {}", e))
    }

    async fn get(&self, id: i64) -> Result<Sport, ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .get(&format!("/sport/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error fetching sport {}: {}", id, e))
    }

    async fn create(&self, draft: &SportDraft) -> Result<Sport, ApiError> {
        self.client
            .post("/sport", draft)
            .await
            .inspect_err(|e| tracing::warn!("Error creating sport: {}", e))
    }

    async fn update(&self, id: i64, draft: &SportDraft) -> Result<Sport, ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .put(&format!("/sport/{}", id), draft)
            .await
            .inspect_err(|e| tracing::warn!("Error updating sport {}: {}", id, e))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .delete(&format!("/sport/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error deleting sport {}: {}", id, e))
    }
}
