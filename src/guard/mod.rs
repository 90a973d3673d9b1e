//! Access control for screens: authentication first, then role membership.

mod navigator;
mod route;

pub use navigator::{Navigation, Navigator};
pub use route::Route;

use crate::models::Role;
use crate::session::SessionSnapshot;

/// Message shown in place of a screen the user may not see
pub const ACCESS_DENIED: &str = "Access denied: you do not have permission to view this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session has not been restored yet; render a placeholder
    Loading,
    RedirectToLogin,
    Allowed,
    /// Shown inline, the route does not change
    Denied(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }
}

/// Required role set for a screen; empty means any authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    required: Vec<Role>,
}

impl RouteGuard {
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: &[Role]) -> Self {
        Self {
            required: roles.to_vec(),
        }
    }

    pub fn state(snapshot: &SessionSnapshot) -> GuardState {
        if snapshot.is_loading() {
            GuardState::Loading
        } else if snapshot.is_authenticated() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }

    pub fn check(&self, snapshot: &SessionSnapshot) -> GuardDecision {
        match Self::state(snapshot) {
            GuardState::Loading => GuardDecision::Loading,
            GuardState::Unauthenticated => GuardDecision::RedirectToLogin,
            GuardState::Authenticated if snapshot.has_role(&self.required) => {
                GuardDecision::Allowed
            }
            GuardState::Authenticated => {
                tracing::debug!(
                    "Denied: role {:?} not in {:?}",
                    snapshot.user().map(|u| u.role),
                    self.required
                );
                GuardDecision::Denied(ACCESS_DENIED.to_string())
            }
        }
    }
}
