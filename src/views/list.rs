use super::{
    load_references, Generation, LoadTicket, ManagedEntity, ReferenceData, ViewContext,
    ViewError,
};
use crate::api::ApiError;
use crate::mock::{next_mock_id, with_fallback, DataMode, Fetched};
use crate::services::ResourceService;

/// Result of one list load, ready to be applied
pub type ListLoad<E> = Fetched<(Vec<E>, ReferenceData)>;

/// State of an entity list screen with its create form
pub struct ListView<E: ManagedEntity> {
    ctx: ViewContext,
    mode: DataMode,
    items: Vec<E>,
    references: ReferenceData,
    loading: bool,
    error: Option<String>,
    form: Option<E::Draft>,
    generation: Generation,
}

impl<E: ManagedEntity> ListView<E> {
    pub fn new(ctx: ViewContext) -> Self {
        let mode = ctx.initial_mode;
        Self {
            ctx,
            mode,
            items: Vec::new(),
            references: ReferenceData::default(),
            loading: false,
            error: None,
            form: None,
            generation: Generation::default(),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
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

    pub fn form(&self) -> Option<&E::Draft> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut E::Draft> {
        self.form.as_mut()
    }

    pub fn can_manage(&self) -> bool {
        self.ctx.can_manage()
    }

    /// Start a load; results for older tickets will be dropped
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.error = None;
        self.generation.next()
    }

    /// Fetch the list and its reference collections without touching the
    /// view, so several loads may be in flight at once
    pub async fn fetch(ctx: ViewContext, mode: DataMode) -> ListLoad<E> {
        let services = ctx.services.clone();
        let live = async {
            tokio::try_join!(
                E::service(&services).list(),
                load_references(&services, E::REFERENCES)
            )
        };

        with_fallback(mode, live, || {
            Some((
                ctx.mock.all::<E>(),
                ReferenceData::from_mock(&ctx.mock, E::REFERENCES),
            ))
        })
        .await
    }

    /// Apply a finished load; returns false when the ticket is stale
    pub fn apply(&mut self, ticket: LoadTicket, fetched: ListLoad<E>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale {} list load", E::LABEL);
            return false;
        }

        self.mode = fetched.mode(self.mode);
        self.loading = false;
        match fetched {
            Fetched::Live((items, refs))
            | Fetched::Mock((items, refs))
            | Fetched::Fallback {
                data: (items, refs),
                ..
            } => {
                self.items = items;
                self.references = refs;
            }
            Fetched::MissingFromMock | Fetched::Failed(_) => {
                self.error = Some("Error loading data.".to_string());
            }
        }
        true
    }

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let fetched = Self::fetch(self.ctx.clone(), self.mode).await;
        self.apply(ticket, fetched);
    }

    /// Switch between live and mock data and reload
    pub async fn set_mock_mode(&mut self, enabled: bool) {
        self.mode = DataMode::from_flag(enabled);
        self.load().await;
    }

    /// Open an empty create form
    pub fn open_form(&mut self) -> Result<&mut E::Draft, ViewError> {
        self.ctx.ensure_can_manage()?;
        Ok(self.form.insert(E::Draft::default()))
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Create the drafted entity; the form stays open when this fails
    pub async fn submit(&mut self) -> Result<E, ViewError> {
        self.ctx.ensure_can_manage()?;
        let draft = self.form.clone().ok_or(ViewError::NoDraft)?;

        let created = match self.mode {
            DataMode::Mock => {
                let id = next_mock_id(self.items.iter().map(|e| e.id()));
                let entity = E::materialize(&draft, id, None, &self.references);
                self.items.push(entity.clone());
                tracing::info!("Created mock {} {}", E::LABEL, id);
                entity
            }
            DataMode::Live => {
                let result = E::service(&self.ctx.services).create(&draft).await;
                let created = result.map_err(|e| self.fail("creating", e))?;
                self.load().await;
                created
            }
        };

        self.form = None;
        Ok(created)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ViewError> {
        self.ctx.ensure_can_manage()?;

        match self.mode {
            DataMode::Mock => {
                self.items.retain(|e| e.id() != id);
                tracing::info!("Deleted mock {} {}", E::LABEL, id);
            }
            DataMode::Live => {
                let result = E::service(&self.ctx.services).delete(id).await;
                result.map_err(|e| self.fail("deleting", e))?;
                self.load().await;
            }
        }
        Ok(())
    }

    fn fail(&mut self, action: &str, source: ApiError) -> ViewError {
        let message = format!("Error {} {}", action, E::LABEL);
        self.error = Some(message.clone());
        ViewError::Failed { message, source }
    }
}
