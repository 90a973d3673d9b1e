use super::{ensure_valid_id, ResourceService};
use crate::api::{ApiError, FormFields, HttpClient, MultipartPayload};
use crate::models::{Athlete, AthleteDraft};

#[derive(Clone)]
pub struct AthleteService {
    client: HttpClient,
}

impl AthleteService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl MultipartPayload for AthleteDraft {
    fn to_form_fields(&self) -> FormFields {
        FormFields::new()
            .text("name", &self.name)
            .optional("age", self.age)
            .optional("category", self.category)
            .optional("sport_id", self.sport_id)
            .indexed("coaches", &self.coaches)
            .file("photo", self.photo.as_ref())
    }
}

impl ResourceService for AthleteService {
    type Entity = Athlete;
    type Draft = AthleteDraft;

    async fn list(&self) -> Result<Vec<Athlete>, ApiError> {
        tracing::debug!("Fetching all athletes");
        self.client
            .get("/athlete")
            .await
            .inspect_err(|e| tracing::warn!("Error fetching all athletes: {}", e))
    }

    async fn get(&self, id: i64) -> Result<Athlete, ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .get(&format!("/athlete-detail/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error fetching athlete {}: {}", id, e))
    }

    async fn create(&self, draft: &AthleteDraft) -> Result<Athlete, ApiError> {
        self.client
            .post_multipart("/athlete", draft.to_form_fields())
            .await
            .inspect_err(|e| tracing::warn!("Error creating athlete: {}", e))
    }

    /// Multipart uploads only go through reliably as POST, so the backend
    /// reads the real verb from `_method`
    async fn update(&self, id: i64, draft: &AthleteDraft) -> Result<Athlete, ApiError> {
        let id = ensure_valid_id(id)?;
        if let Some(photo) = &draft.photo {
            tracing::debug!(
                "Uploading photo {} ({}, {} bytes)",
                photo.file_name,
                photo.content_type,
                photo.len()
            );
        }

        self.client
            .post_multipart(&format!("/athlete/{}?_method=PUT", id), draft.to_form_fields())
            .await
            .inspect_err(|e| tracing::warn!("Error updating athlete {}: {}", id, e))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let id = ensure_valid_id(id)?;
        self.client
            .delete(&format!("/athlete/{}", id))
            .await
            .inspect_err(|e| tracing::warn!("Error deleting athlete {}: {}", id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PhotoUpload};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_fields() {
        let draft = AthleteDraft {
            name: "João Silva".to_string(),
            age: Some(25),
            category: Some(Category::Professional),
            sport_id: Some(1),
            coaches: vec![1, 6],
            photo: None,
        };

        let fields = draft.to_form_fields();
        assert_eq!(
            fields.names(),
            vec!["name", "age", "category", "sport_id", "coaches[0]", "coaches[1]"]
        );
        assert_eq!(fields.get_text("category"), Some("Professional"));
        assert_eq!(fields.get_text("coaches[1]"), Some("6"));
        assert!(fields.get_file("photo").is_none());
    }

    #[test]
    fn test_form_fields_with_photo_and_blanks() {
        let draft = AthleteDraft {
            name: "Carla".to_string(),
            photo: Some(PhotoUpload::new("c.png", mime::IMAGE_PNG, vec![0u8; 8])),
            ..AthleteDraft::default()
        };

        let fields = draft.to_form_fields();
        assert_eq!(fields.names(), vec!["name", "photo"]);
    }
}
