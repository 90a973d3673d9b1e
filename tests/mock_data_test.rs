use std::collections::HashSet;

use sports_console::mock::MockStore;
use sports_console::models::athlete::{MAX_AGE, MIN_AGE};
use sports_console::models::{is_valid_license, Category, Specialty};

fn store() -> MockStore {
    MockStore::load().expect("fixtures parse")
}

#[test]
fn test_ids_are_unique_per_entity() {
    let store = store();

    let sport_ids: HashSet<i64> = store.sports().iter().map(|s| s.id).collect();
    let athlete_ids: HashSet<i64> = store.athletes().iter().map(|a| a.id).collect();
    let coach_ids: HashSet<i64> = store.coaches().iter().map(|c| c.id).collect();

    assert_eq!(sport_ids.len(), store.sports().len());
    assert_eq!(athlete_ids.len(), store.athletes().len());
    assert_eq!(coach_ids.len(), store.coaches().len());
}

#[test]
fn test_references_resolve() {
    let store = store();
    let sport_ids: HashSet<i64> = store.sports().iter().map(|s| s.id).collect();
    let coach_ids: HashSet<i64> = store.coaches().iter().map(|c| c.id).collect();
    let athlete_ids: HashSet<i64> = store.athletes().iter().map(|a| a.id).collect();

    for athlete in store.athletes() {
        let sport_id = athlete.sport_id().expect("athlete has a sport");
        assert!(sport_ids.contains(&sport_id), "athlete {}", athlete.id);
        for coach in &athlete.coaches {
            assert!(coach_ids.contains(&coach.id), "athlete {}", athlete.id);
        }
    }

    for coach in store.coaches() {
        let sport_id = coach.sport_id().expect("coach has a sport");
        assert!(sport_ids.contains(&sport_id), "coach {}", coach.id);
        for athlete in &coach.athletes {
            assert!(athlete_ids.contains(&athlete.id), "coach {}", coach.id);
        }
    }

    assert!(store.integrity_violations().is_empty());
}

#[test]
fn test_athlete_ages_and_categories() {
    for athlete in store().athletes() {
        let age = athlete.age.expect("athlete has an age");
        assert!(
            (MIN_AGE..=MAX_AGE).contains(&age),
            "{} is {}",
            athlete.name,
            age
        );
        let category = athlete.category.expect("athlete has a category");
        assert!(Category::ALL.contains(&category));
    }
}

#[test]
fn test_coach_licenses_and_specialties() {
    for coach in store().coaches() {
        assert!(is_valid_license(&coach.license), "{}", coach.license);
        let specialty = coach.specialty.expect("coach has a specialty");
        assert!(Specialty::ALL.contains(&specialty));
    }
}

#[test]
fn test_athlete_coach_links_are_bidirectional() {
    let store = store();

    for athlete in store.athletes() {
        for coach_ref in &athlete.coaches {
            let coach = store
                .coaches()
                .iter()
                .find(|c| c.id == coach_ref.id)
                .unwrap();
            assert!(
                coach.athletes.iter().any(|a| a.id == athlete.id),
                "coach {} is missing athlete {}",
                coach.id,
                athlete.id
            );
        }
    }
}

#[test]
fn test_sport_members_belong_to_the_sport() {
    let store = store();

    for sport in store.sports() {
        for athlete_ref in &sport.athletes {
            assert_eq!(athlete_ref.sport_id, Some(sport.id));
            let athlete = store
                .athletes()
                .iter()
                .find(|a| a.id == athlete_ref.id)
                .unwrap();
            assert_eq!(athlete.sport_id(), Some(sport.id));
        }
        for coach_ref in &sport.coaches {
            assert_eq!(coach_ref.sport_id, Some(sport.id));
            let coach = store
                .coaches()
                .iter()
                .find(|c| c.id == coach_ref.id)
                .unwrap();
            assert_eq!(coach.sport_id(), Some(sport.id));
        }

        let expected: HashSet<i64> = store
            .athletes()
            .iter()
            .filter(|a| a.sport_id() == Some(sport.id))
            .map(|a| a.id)
            .collect();
        let listed: HashSet<i64> = sport.athletes.iter().map(|a| a.id).collect();
        assert_eq!(listed, expected, "sport {}", sport.id);
    }
}
