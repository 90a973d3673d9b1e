//! Static fixture data used when the backend is unreachable or when mock mode
//! is switched on. Fixtures are embedded in the binary and parsed once; views
//! clone what they need and any mutation stays in that copy.

mod fallback;

pub use fallback::{with_fallback, DataMode, Fetched};

use serde::de::DeserializeOwned;
use std::collections::HashSet;

use crate::api::ApiError;
use crate::models::{Athlete, Coach, Sport};

const SPORTS_JSON: &str = include_str!("../../fixtures/sports.json");
const ATHLETES_JSON: &str = include_str!("../../fixtures/athletes.json");
const COACHES_JSON: &str = include_str!("../../fixtures/coaches.json");

/// In-memory fixture lists
#[derive(Debug, Clone)]
pub struct MockStore {
    sports: Vec<Sport>,
    athletes: Vec<Athlete>,
    coaches: Vec<Coach>,
}

/// Entities that have a fixture list
pub trait Fixture: Clone {
    fn id(&self) -> i64;
    fn fixtures(store: &MockStore) -> &[Self];
}

impl Fixture for Sport {
    fn id(&self) -> i64 {
        self.id
    }

    fn fixtures(store: &MockStore) -> &[Self] {
        &store.sports
    }
}

impl Fixture for Athlete {
    fn id(&self) -> i64 {
        self.id
    }

    fn fixtures(store: &MockStore) -> &[Self] {
        &store.athletes
    }
}

impl Fixture for Coach {
    fn id(&self) -> i64 {
        self.id
    }

    fn fixtures(store: &MockStore) -> &[Self] {
        &store.coaches
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_str(raw).map_err(|e| ApiError::Format(format!("{} fixtures: {}", name, e)))
}

impl MockStore {
    /// Parse the embedded fixtures
    pub fn load() -> Result<Self, ApiError> {
        let store = Self::from_parts(
            parse("sports", SPORTS_JSON)?,
            parse("athletes", ATHLETES_JSON)?,
            parse("coaches", COACHES_JSON)?,
        );

        for violation in store.integrity_violations() {
            tracing::warn!("Mock fixture inconsistency: {}", violation);
        }

        tracing::debug!(
            "Loaded mock fixtures: {} sports, {} athletes, {} coaches",
            store.sports.len(),
            store.athletes.len(),
            store.coaches.len()
        );

        Ok(store)
    }

    pub fn from_parts(sports: Vec<Sport>, athletes: Vec<Athlete>, coaches: Vec<Coach>) -> Self {
        Self {
            sports,
            athletes,
            coaches,
        }
    }

    pub fn sports(&self) -> &[Sport] {
        &self.sports
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    pub fn coaches(&self) -> &[Coach] {
        &self.coaches
    }

    pub fn all<E: Fixture>(&self) -> Vec<E> {
        E::fixtures(self).to_vec()
    }

    pub fn find<E: Fixture>(&self, id: i64) -> Option<E> {
        E::fixtures(self).iter().find(|e| e.id() == id).cloned()
    }

    /// Referential problems between the fixture lists, one line each
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let sport_ids: HashSet<i64> = self.sports.iter().map(|s| s.id).collect();

        for athlete in &self.athletes {
            match athlete.sport_id() {
                Some(id) if !sport_ids.contains(&id) => violations.push(format!(
                    "athlete {} references missing sport {}",
                    athlete.id, id
                )),
                _ => {}
            }

            for coach_ref in &athlete.coaches {
                let mutual = self
                    .coaches
                    .iter()
                    .find(|c| c.id == coach_ref.id)
                    .map(|c| c.athletes.iter().any(|a| a.id == athlete.id));
                match mutual {
                    None => violations.push(format!(
                        "athlete {} references missing coach {}",
                        athlete.id, coach_ref.id
                    )),
                    Some(false) => violations.push(format!(
                        "coach {} does not list athlete {}",
                        coach_ref.id, athlete.id
                    )),
                    Some(true) => {}
                }
            }
        }

        for coach in &self.coaches {
            match coach.sport_id() {
                Some(id) if !sport_ids.contains(&id) => violations.push(format!(
                    "coach {} references missing sport {}",
                    coach.id, id
                )),
                _ => {}
            }

            for athlete_ref in &coach.athletes {
                let mutual = self
                    .athletes
                    .iter()
                    .find(|a| a.id == athlete_ref.id)
                    .map(|a| a.coaches.iter().any(|c| c.id == coach.id));
                if mutual != Some(true) {
                    violations.push(format!(
                        "coach {} lists athlete {} without a matching back reference",
                        coach.id, athlete_ref.id
                    ));
                }
            }
        }

        for sport in &self.sports {
            for athlete_ref in &sport.athletes {
                let athlete_sport = self
                    .athletes
                    .iter()
                    .find(|a| a.id == athlete_ref.id)
                    .and_then(|a| a.sport_id());
                if athlete_sport != Some(sport.id) || athlete_ref.sport_id != Some(sport.id) {
                    violations.push(format!(
                        "sport {} lists athlete {} which belongs elsewhere",
                        sport.id, athlete_ref.id
                    ));
                }
            }

            for coach_ref in &sport.coaches {
                let coach_sport = self
                    .coaches
                    .iter()
                    .find(|c| c.id == coach_ref.id)
                    .and_then(|c| c.sport_id());
                if coach_sport != Some(sport.id) || coach_ref.sport_id != Some(sport.id) {
                    violations.push(format!(
                        "sport {} lists coach {} which belongs elsewhere",
                        sport.id, coach_ref.id
                    ));
                }
            }
        }

        violations
    }
}

/// Id for an entity created in mock mode: the current time in milliseconds,
/// bumped past every existing id
pub fn next_mock_id(existing: impl IntoIterator<Item = i64>) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let highest = existing.into_iter().max().unwrap_or(0);
    now.max(highest + 1)
}
