use super::ReferenceData;
use crate::mock::Fixture;
use crate::models::{Athlete, AthleteDraft, Coach, CoachDraft, Sport, SportDraft};
use crate::services::{AthleteService, CoachService, ResourceService, Services, SportService};

/// Which reference collections a screen loads alongside its entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct References {
    pub sports: bool,
    pub athletes: bool,
    pub coaches: bool,
}

/// Glue between an entity, its service and the generic views
pub trait ManagedEntity: Fixture + Send + Sync + 'static {
    type Draft: Clone + Default + Send + Sync;
    type Service: ResourceService<Entity = Self, Draft = Self::Draft>;

    /// Lowercase singular name used in messages
    const LABEL: &'static str;
    /// Capitalized singular name used in messages
    const TITLE: &'static str;
    const REFERENCES: References;

    fn service(services: &Services) -> &Self::Service;

    fn draft(&self) -> Self::Draft;

    /// Build the entity a mock-mode create or update produces
    fn materialize(
        draft: &Self::Draft,
        id: i64,
        previous: Option<&Self>,
        refs: &ReferenceData,
    ) -> Self;
}

impl ManagedEntity for Sport {
    type Draft = SportDraft;
    type Service = SportService;

    const LABEL: &'static str = "sport";
    const TITLE: &'static str = "Sport";
    const REFERENCES: References = References {
        sports: false,
        athletes: false,
        coaches: false,
    };

    fn service(services: &Services) -> &SportService {
        &services.sports
    }

    fn draft(&self) -> SportDraft {
        Sport::draft(self)
    }

    fn materialize(
        draft: &SportDraft,
        id: i64,
        previous: Option<&Self>,
        _refs: &ReferenceData,
    ) -> Self {
        Sport {
            id,
            name: draft.name.clone(),
            federation: draft.federation.clone(),
            description: draft.description.clone(),
            athletes: previous.map(|s| s.athletes.clone()).unwrap_or_default(),
            coaches: previous.map(|s| s.coaches.clone()).unwrap_or_default(),
        }
    }
}

impl ManagedEntity for Athlete {
    type Draft = AthleteDraft;
    type Service = AthleteService;

    const LABEL: &'static str = "athlete";
    const TITLE: &'static str = "Athlete";
    const REFERENCES: References = References {
        sports: true,
        athletes: false,
        coaches: true,
    };

    fn service(services: &Services) -> &AthleteService {
        &services.athletes
    }

    fn draft(&self) -> AthleteDraft {
        Athlete::draft(self)
    }

    fn materialize(
        draft: &AthleteDraft,
        id: i64,
        previous: Option<&Self>,
        refs: &ReferenceData,
    ) -> Self {
        let (photo, image_url) = match (&draft.photo, previous) {
            (Some(upload), _) => (Some(upload.file_name.clone()), None),
            (None, Some(prev)) => (prev.photo.clone(), prev.image_url.clone()),
            (None, None) => (None, None),
        };

        Athlete {
            id,
            name: draft.name.clone(),
            age: draft.age,
            category: draft.category,
            sport_id: draft.sport_id,
            sport: draft
                .sport_id
                .and_then(|sid| refs.sport(sid))
                .map(Sport::to_ref),
            coaches: refs
                .coaches
                .iter()
                .filter(|c| draft.coaches.contains(&c.id))
                .map(Coach::to_ref)
                .collect(),
            photo,
            image_url,
        }
    }
}

impl ManagedEntity for Coach {
    type Draft = CoachDraft;
    type Service = CoachService;

    const LABEL: &'static str = "coach";
    const TITLE: &'static str = "Coach";
    const REFERENCES: References = References {
        sports: true,
        athletes: true,
        coaches: false,
    };

    fn service(services: &Services) -> &CoachService {
        &services.coaches
    }

    fn draft(&self) -> CoachDraft {
        Coach::draft(self)
    }

    fn materialize(
        draft: &CoachDraft,
        id: i64,
        previous: Option<&Self>,
        refs: &ReferenceData,
    ) -> Self {
        let (photo, image_url) = match (&draft.photo, previous) {
            (Some(upload), _) => (Some(upload.file_name.clone()), None),
            (None, Some(prev)) => (prev.photo.clone(), prev.image_url.clone()),
            (None, None) => (None, None),
        };

        Coach {
            id,
            name: draft.name.clone(),
            license: draft.license.clone(),
            specialty: draft.specialty,
            sport_id: draft.sport_id,
            sport: draft
                .sport_id
                .and_then(|sid| refs.sport(sid))
                .map(Sport::to_ref),
            athletes: refs
                .athletes
                .iter()
                .filter(|a| draft.athletes.contains(&a.id))
                .map(Athlete::to_ref)
                .collect(),
            photo,
            image_url,
        }
    }
}
