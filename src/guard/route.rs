use std::fmt;

use super::RouteGuard;
use crate::api::ApiError;
use crate::services::parse_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Login,
    Register,
    Sports,
    SportDetail(i64),
    Athletes,
    AthleteDetail(i64),
    Coaches,
    CoachDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Sports => "/sports".to_string(),
            Route::SportDetail(id) => format!("/sports/{}", id),
            Route::Athletes => "/athletes".to_string(),
            Route::AthleteDetail(id) => format!("/athletes/{}", id),
            Route::Coaches => "/coaches".to_string(),
            Route::CoachDetail(id) => format!("/coaches/{}", id),
        }
    }

    /// Parse a path; detail ids must be positive
    pub fn parse(path: &str) -> Result<Self, ApiError> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["sports"] => Route::Sports,
            ["sports", id] => Route::SportDetail(parse_id(id)?),
            ["athletes"] => Route::Athletes,
            ["athletes", id] => Route::AthleteDetail(parse_id(id)?),
            ["coaches"] => Route::Coaches,
            ["coaches", id] => Route::CoachDetail(parse_id(id)?),
            _ => return Err(ApiError::NotFound(format!("No route for {}", path))),
        };

        Ok(route)
    }

    /// Guard for the screen, `None` for public screens
    pub fn guard(&self) -> Option<RouteGuard> {
        match self {
            Route::Home | Route::About | Route::Login | Route::Register => None,
            _ => Some(RouteGuard::authenticated()),
        }
    }

    pub fn is_public(&self) -> bool {
        self.guard().is_none()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("/athletes/").unwrap(), Route::Athletes);
        assert_eq!(Route::parse("coaches/4").unwrap(), Route::CoachDetail(4));
        assert!(matches!(
            Route::parse("/sports/abc"),
            Err(ApiError::InvalidId(_))
        ));
        assert!(matches!(Route::parse("/teams"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_path_round_trips() {
        let route = Route::SportDetail(3);
        assert_eq!(Route::parse(&route.path()).unwrap(), route);
    }

    #[test]
    fn test_entity_pages_are_protected() {
        assert!(Route::About.is_public());
        assert!(!Route::Sports.is_public());
        assert!(!Route::AthleteDetail(1).is_public());
        assert_eq!(Route::Coaches.guard(), Some(RouteGuard::authenticated()));
    }
}
