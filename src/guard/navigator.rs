use super::{GuardDecision, Route};
use crate::session::{SessionChange, SessionSnapshot};

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Show(Route),
    /// Waiting for the session to be restored
    Pending(Route),
    Redirected { from: Route, to: Route },
    Denied { route: Route, message: String },
}

/// Current screen plus the protected route a login should return to
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    intended: Option<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Route::Home,
            intended: None,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn intended(&self) -> Option<Route> {
        self.intended
    }

    pub fn navigate(&mut self, route: Route, snapshot: &SessionSnapshot) -> Navigation {
        let decision = match route.guard() {
            None => GuardDecision::Allowed,
            Some(guard) => guard.check(snapshot),
        };

        match decision {
            GuardDecision::Allowed => {
                self.current = route;
                Navigation::Show(route)
            }
            GuardDecision::Loading => {
                self.current = route;
                Navigation::Pending(route)
            }
            GuardDecision::RedirectToLogin => {
                tracing::debug!("Redirecting {} to login", route);
                self.intended = Some(route);
                self.current = Route::Login;
                Navigation::Redirected {
                    from: route,
                    to: Route::Login,
                }
            }
            GuardDecision::Denied(message) => {
                self.current = route;
                Navigation::Denied { route, message }
            }
        }
    }

    /// React to a published session transition
    pub fn on_session_change(&mut self, snapshot: &SessionSnapshot) -> Option<Navigation> {
        match snapshot.last_change? {
            SessionChange::Expired if !self.current.is_public() => {
                tracing::info!("Session expired, returning to login");
                let from = self.current;
                self.intended = Some(from);
                self.current = Route::Login;
                Some(Navigation::Redirected {
                    from,
                    to: Route::Login,
                })
            }
            SessionChange::LoggedIn if self.current == Route::Login => {
                let target = self.intended.take().unwrap_or(Route::Home);
                Some(self.navigate(target, snapshot))
            }
            SessionChange::LoggedOut if !self.current.is_public() => {
                self.current = Route::Home;
                Some(Navigation::Show(Route::Home))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::session::SessionPhase;

    fn ready(role: Option<Role>, change: SessionChange) -> SessionSnapshot {
        SessionSnapshot {
            phase: SessionPhase::Ready,
            token: role.map(|_| "tok".to_string()),
            user: role.map(|role| User {
                id: 9,
                name: "Nav".to_string(),
                email: None,
                role,
            }),
            last_change: Some(change),
        }
    }

    #[test]
    fn test_login_returns_to_intended_route() {
        let mut nav = Navigator::new();
        let anonymous = ready(None, SessionChange::Restored);

        let outcome = nav.navigate(Route::AthleteDetail(2), &anonymous);
        assert_eq!(
            outcome,
            Navigation::Redirected {
                from: Route::AthleteDetail(2),
                to: Route::Login
            }
        );
        assert_eq!(nav.current(), Route::Login);

        let logged_in = ready(Some(Role::User), SessionChange::LoggedIn);
        let outcome = nav.on_session_change(&logged_in);
        assert_eq!(outcome, Some(Navigation::Show(Route::AthleteDetail(2))));
        assert_eq!(nav.intended(), None);
    }

    #[test]
    fn test_expiry_forces_login() {
        let mut nav = Navigator::new();
        nav.navigate(Route::Sports, &ready(Some(Role::Admin), SessionChange::LoggedIn));

        let outcome = nav.on_session_change(&ready(None, SessionChange::Expired));
        assert_eq!(
            outcome,
            Some(Navigation::Redirected {
                from: Route::Sports,
                to: Route::Login
            })
        );
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_expiry_on_public_route_is_ignored() {
        let mut nav = Navigator::new();
        nav.navigate(Route::About, &ready(None, SessionChange::Restored));
        assert_eq!(nav.on_session_change(&ready(None, SessionChange::Expired)), None);
        assert_eq!(nav.current(), Route::About);
    }
}
