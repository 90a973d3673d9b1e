use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::watch;

use super::config_cmd;
use crate::config::Config;
use crate::guard::{Navigation, Navigator, Route};
use crate::mock::DataMode;
use crate::services::Services;
use crate::session::{FileStore, SessionSnapshot, SessionStore};
use crate::views::{ViewContext, MOCK_NOTICE};

/// Loaded configuration, persisted session and the navigator for one run
pub struct App {
    pub config: Config,
    pub views: ViewContext,
    navigator: Navigator,
    session_rx: watch::Receiver<SessionSnapshot>,
}

impl App {
    pub fn open(config_path: Option<&str>, mock: bool) -> Result<Self> {
        let config = config_cmd::load_config(config_path)?;

        let store = FileStore::open(FileStore::default_path()?)
            .context("Failed to open session storage")?;
        let session = SessionStore::open(Arc::new(store));

        let mut views =
            ViewContext::new(&config, session.clone()).context("Failed to set up services")?;
        if mock {
            views.initial_mode = DataMode::Mock;
        }

        let session_rx = session.subscribe();

        Ok(Self {
            config,
            views,
            navigator: Navigator::new(),
            session_rx,
        })
    }

    pub fn services(&self) -> &Services {
        &self.views.services
    }

    pub fn session(&self) -> &SessionStore {
        &self.views.session
    }

    /// Navigate to a screen, failing when the guard turns the user away
    pub fn enter(&mut self, route: Route) -> Result<()> {
        let snapshot = self.session().snapshot();
        match self.navigator.navigate(route, &snapshot) {
            Navigation::Show(_) | Navigation::Pending(_) => Ok(()),
            Navigation::Redirected { from, .. } => {
                bail!(
                    "{} requires login. Use 'sports-console login' to authenticate.",
                    from
                )
            }
            Navigation::Denied { message, .. } => bail!(message),
        }
    }

    /// Apply any session transition published during the command
    pub fn follow_session(&mut self) {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return;
        }

        let snapshot = self.session_rx.borrow_and_update().clone();
        if let Some(Navigation::Redirected { from, .. }) =
            self.navigator.on_session_change(&snapshot)
        {
            println!();
            println!(
                "{} Your session expired while viewing {}.",
                "✗".red(),
                from
            );
            println!("Use 'sports-console login' to authenticate again.");
        }
    }

    /// Mark output that came from the fixtures
    pub fn print_mode(&self, mode: DataMode) {
        if mode.is_mock() {
            println!("{}", MOCK_NOTICE.yellow());
        }
    }
}
