use super::{ensure_valid_id, ResourceService};
use crate::api::{ApiError, FormFields, HttpClient, MultipartPayload};
use crate::models::{Coach, CoachDraft};

#[derive(Clone)]
pub struct CoachService {
    client: HttpClient,
}

impl CoachService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl MultipartPayload for CoachDraft {
    fn to_form_fields(&self) -> FormFields {
        FormFields::new()
            .text("name", &self.name)
            .text("license", &self.license)
            .optional("specialty", self.specialty)
            .optional("sport_id", self.sport_id)
            .indexed("athletes", &self.athletes)
            .file("photo", self.photo.as_ref())
    }
}

impl ResourceService for CoachService {
    type Entity = Coach;
    type Draft = CoachDraft;

    async fn list(&self) -> Result<Vec<Coach>, ApiError> {
        tracing::debug!("Fetching all coaches");
        self.client
            .get("/coach")
            .await
            .inspect_err(|e| tracing::warn!("Error fetching all coaches: {}", e))
    }

    async fn get(&self, id: i64) -> Result<Coach, ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .get(&format!("/coach/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error fetching coach {}: {}", id, e))
    }

    async fn create(&self, draft: &CoachDraft) -> Result<Coach, ApiError> {
        self.client
            .post_multipart("/coach", draft.to_form_fields())
            .await
            .inspect_err(|e| tracing::warn!("Error creating coach: {}", e))
    }

    async fn update(&self, id: i64, draft: &CoachDraft) -> Result<Coach, ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .post_multipart(&format!("/coach/{}?_method=PUT", id), draft.to_form_fields())
            .await
            .inspect_err(|e| tracing::warn!("Error updating coach {}: {}", id, e))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .delete(&format!("/coach/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error deleting coach {}: {}", id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;

    #[test]
    fn test_form_fields() {
        let draft = CoachDraft {
            name: "Carlos Pereira".to_string(),
            license: "CREF-123-456".to_string(),
            specialty: Some(Specialty::PhysicalPreparation),
            sport_id: Some(1),
            athletes: vec![1, 5],
            photo: None,
        };

        let fields = draft.to_form_fields();
        assert_eq!(fields.get_text("license"), Some("CREF-123-456"));
        assert_eq!(fields.get_text("specialty"), Some("Physical Preparation"));
        assert_eq!(fields.get_text("athletes[0]"), Some("1"));
        assert_eq!(fields.get_text("athletes[1]"), Some("5"));
    }
}
