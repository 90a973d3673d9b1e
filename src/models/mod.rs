pub mod athlete;
pub mod coach;
pub mod photo;
pub mod sport;
pub mod user;

pub use athlete::{Athlete, AthleteDraft, AthleteRef, Category};
pub use coach::{is_valid_license, Coach, CoachDraft, CoachRef, Specialty};
pub use photo::PhotoUpload;
pub use sport::{Sport, SportDraft, SportRef};
pub use user::{Role, Session, User};
