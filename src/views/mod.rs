//! View controllers: the state a list, detail or edit screen holds, and the
//! loads and mutations that change it.
//!
//! Reads go through [`with_fallback`](crate::mock::with_fallback) so a screen
//! keeps working from fixtures when the backend is down. Writes never fall
//! back; in mock mode they only touch the view's own copy.

mod detail;
mod entity;
mod list;
mod photo;

pub use crate::mock::DataMode;
pub use detail::DetailView;
pub use entity::{ManagedEntity, References};
pub use list::ListView;
pub use photo::{resolve_photo_url, HasPhoto, DEFAULT_PHOTO};

use std::sync::Arc;

use crate::api::ApiError;
use crate::config::Config;
use crate::mock::MockStore;
use crate::models::{Athlete, Coach, Role, Sport};
use crate::services::{ResourceService, Services};
use crate::session::SessionStore;

/// Shown next to data that came from the fixtures
pub const MOCK_NOTICE: &str = "(Using mock data)";

/// Everything a view needs, cheap to clone into spawned loads
#[derive(Clone)]
pub struct ViewContext {
    pub services: Services,
    pub mock: Arc<MockStore>,
    pub session: SessionStore,
    pub storage_url: String,
    pub initial_mode: DataMode,
}

impl ViewContext {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self, ApiError> {
        Ok(Self {
            services: Services::new(config, session.clone())?,
            mock: Arc::new(MockStore::load()?),
            session,
            storage_url: config.api.storage_url.clone(),
            initial_mode: DataMode::from_flag(config.data.use_mock),
        })
    }

    /// Whether the current user may create, edit and delete
    pub fn can_manage(&self) -> bool {
        self.session.has_role(&Role::MANAGERS)
    }

    fn ensure_can_manage(&self) -> Result<(), ViewError> {
        if self.can_manage() {
            Ok(())
        } else {
            Err(ViewError::Denied)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Only admins and managers can change records")]
    Denied,

    #[error("Nothing is being edited")]
    NoDraft,

    #[error("Nothing has been loaded")]
    NotLoaded,

    #[error("{message}")]
    Failed {
        message: String,
        #[source]
        source: ApiError,
    },
}

/// Collections used to fill form pickers and to resolve ids in mock mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub sports: Vec<Sport>,
    pub athletes: Vec<Athlete>,
    pub coaches: Vec<Coach>,
}

impl ReferenceData {
    pub fn from_mock(mock: &MockStore, needs: References) -> Self {
        Self {
            sports: if needs.sports { mock.all() } else { Vec::new() },
            athletes: if needs.athletes { mock.all() } else { Vec::new() },
            coaches: if needs.coaches { mock.all() } else { Vec::new() },
        }
    }

    pub fn sport(&self, id: i64) -> Option<&Sport> {
        self.sports.iter().find(|s| s.id == id)
    }

    pub fn coach(&self, id: i64) -> Option<&Coach> {
        self.coaches.iter().find(|c| c.id == id)
    }
}

/// Fetch the reference collections a screen needs, concurrently
pub async fn load_references(
    services: &Services,
    needs: References,
) -> Result<ReferenceData, ApiError> {
    let sports = async {
        if needs.sports {
            services.sports.list().await
        } else {
            Ok(Vec::new())
        }
    };
    let athletes = async {
        if needs.athletes {
            services.athletes.list().await
        } else {
            Ok(Vec::new())
        }
    };
    let coaches = async {
        if needs.coaches {
            services.coaches.list().await
        } else {
            Ok(Vec::new())
        }
    };

    let (sports, athletes, coaches) = tokio::try_join!(sports, athletes, coaches)?;
    Ok(ReferenceData {
        sports,
        athletes,
        coaches,
    })
}

/// Per-view load counter; only the newest ticket may apply its result
#[derive(Debug, Default)]
pub struct Generation(u64);

/// Handed out when a load starts and checked when it finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl Generation {
    pub fn next(&mut self) -> LoadTicket {
        self.0 += 1;
        LoadTicket(self.0)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.0 == ticket.0
    }
}
