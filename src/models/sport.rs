use serde::{Deserialize, Serialize};

use super::{AthleteRef, CoachRef};

/// Sport as returned by the backend and the mock fixtures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub federation: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub athletes: Vec<AthleteRef>,
    #[serde(default)]
    pub coaches: Vec<CoachRef>,
}

/// Denormalized sport embedded in athletes and coaches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SportRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub federation: Option<String>,
}

/// Editable sport fields, sent as a JSON body
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SportDraft {
    pub name: String,
    pub federation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Sport {
    pub fn to_ref(&self) -> SportRef {
        SportRef {
            id: self.id,
            name: self.name.clone(),
            federation: Some(self.federation.clone()),
        }
    }

    /// Seed an edit draft from the current values
    pub fn draft(&self) -> SportDraft {
        SportDraft {
            name: self.name.clone(),
            federation: self.federation.clone(),
            description: self.description.clone(),
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.federation)
    }
}
