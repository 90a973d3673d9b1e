use super::{
    load_references, Generation, LoadTicket, ManagedEntity, ReferenceData, ViewContext,
    ViewError, MOCK_NOTICE,
};
use crate::api::ApiError;
use crate::mock::{with_fallback, DataMode, Fetched};
use crate::services::{parse_id, ResourceService};

/// Result of one detail load, ready to be applied
pub type DetailLoad<E> = Result<Fetched<(E, ReferenceData)>, ApiError>;

/// State of a single-entity screen with its edit form
pub struct DetailView<E: ManagedEntity> {
    ctx: ViewContext,
    mode: DataMode,
    raw_id: String,
    entity: Option<E>,
    references: ReferenceData,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    editing: Option<E::Draft>,
    generation: Generation,
}

impl<E: ManagedEntity> DetailView<E> {
    /// `raw_id` is the id segment of the route, validated on load
    pub fn new(ctx: ViewContext, raw_id: impl Into<String>) -> Self {
        let mode = ctx.initial_mode;
        Self {
            ctx,
            mode,
            raw_id: raw_id.into(),
            entity: None,
            references: ReferenceData::default(),
            loading: false,
            error: None,
            notice: None,
            editing: None,
            generation: Generation::default(),
        }
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn references(&self) -> &ReferenceData {
        &self.references
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set when the screen fell back to fixtures
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn draft(&self) -> Option<&E::Draft> {
        self.editing.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut E::Draft> {
        self.editing.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn can_manage(&self) -> bool {
        self.ctx.can_manage()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.error = None;
        self.generation.next()
    }

    /// Fetch the entity plus its form references. Failures loading the
    /// references are logged and leave the pickers empty.
    pub async fn fetch(ctx: ViewContext, mode: DataMode, raw_id: String) -> DetailLoad<E> {
        let id = parse_id(&raw_id)?;
        let services = ctx.services.clone();

        let live = async {
            let (entity, refs) = tokio::join!(
                E::service(&services).get(id),
                load_references(&services, E::REFERENCES)
            );
            let refs = refs.unwrap_or_else(|e| {
                tracing::warn!("Error loading {} form references: {}", E::LABEL, e);
                ReferenceData::default()
            });
            entity.map(|entity| (entity, refs))
        };

        let fetched = with_fallback(mode, live, || {
            ctx.mock
                .find::<E>(id)
                .map(|entity| (entity, ReferenceData::from_mock(&ctx.mock, E::REFERENCES)))
        })
        .await;

        Ok(fetched)
    }

    pub fn apply(&mut self, ticket: LoadTicket, load: DetailLoad<E>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale {} detail load", E::LABEL);
            return false;
        }
        self.loading = false;

        let fetched = match load {
            Ok(fetched) => fetched,
            Err(_) => {
                self.entity = None;
                self.error = Some(format!("Invalid {} id", E::LABEL));
                return true;
            }
        };

        self.mode = fetched.mode(self.mode);
        match fetched {
            Fetched::Live((entity, refs)) | Fetched::Mock((entity, refs)) => {
                self.entity = Some(entity);
                self.references = refs;
            }
            Fetched::Fallback {
                data: (entity, refs),
                cause,
            } => {
                tracing::info!("Showing mock {} after: {}", E::LABEL, cause);
                self.entity = Some(entity);
                self.references = refs;
                self.notice = Some(MOCK_NOTICE.to_string());
            }
            Fetched::MissingFromMock => {
                self.entity = None;
                self.error = Some(format!("{} not found in mock data", E::TITLE));
            }
            Fetched::Failed(ApiError::SessionExpired(_)) => {
                self.entity = None;
                self.error = Some(format!("Error loading {} data", E::LABEL));
            }
            Fetched::Failed(_) => {
                self.entity = None;
                self.error = Some(format!("{} not found", E::TITLE));
            }
        }
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let load = Self::fetch(self.ctx.clone(), self.mode, self.raw_id.clone()).await;
        self.apply(ticket, load);
    }

    pub async fn set_mock_mode(&mut self, enabled: bool) {
        self.mode = DataMode::from_flag(enabled);
        if !enabled {
            self.notice = None;
        }
        self.load().await;
    }

    /// Seed the edit form from the loaded entity
    pub fn begin_edit(&mut self) -> Result<&mut E::Draft, ViewError> {
        self.ctx.ensure_can_manage()?;
        let draft = self.entity.as_ref().map(E::draft).ok_or(ViewError::NotLoaded)?;
        Ok(self.editing.insert(draft))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the edit form; the form stays open when this fails
    pub async fn submit_edit(&mut self) -> Result<E, ViewError> {
        self.ctx.ensure_can_manage()?;
        let draft = self.editing.clone().ok_or(ViewError::NoDraft)?;
        let id = match self.entity.as_ref() {
            Some(entity) => entity.id(),
            None => return Err(ViewError::NotLoaded),
        };

        let updated = match self.mode {
            DataMode::Mock => {
                let updated =
                    E::materialize(&draft, id, self.entity.as_ref(), &self.references);
                self.entity = Some(updated.clone());
                tracing::info!("Updated mock {} {}", E::LABEL, id);
                updated
            }
            DataMode::Live => {
                let result = E::service(&self.ctx.services).update(id, &draft).await;
                let updated = result.map_err(|e| self.fail("updating", e))?;
                self.load().await;
                updated
            }
        };

        self.editing = None;
        Ok(updated)
    }

    pub async fn delete(&mut self) -> Result<(), ViewError> {
        self.ctx.ensure_can_manage()?;
        let id = match self.entity.as_ref() {
            Some(entity) => entity.id(),
            None => return Err(ViewError::NotLoaded),
        };

        if self.mode == DataMode::Live {
            let result = E::service(&self.ctx.services).delete(id).await;
            result.map_err(|e| self.fail("deleting", e))?;
        }

        tracing::info!("Deleted {} {}", E::LABEL, id);
        self.entity = None;
        self.editing = None;
        Ok(())
    }

    fn fail(&mut self, action: &str, source: ApiError) -> ViewError {
        let message = format!("Error {} {}", action, E::LABEL);
        self.error = Some(message.clone());
        ViewError::Failed { message, source }
    }
}
