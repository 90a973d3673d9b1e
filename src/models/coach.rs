use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::{AthleteRef, PhotoUpload, SportRef};

/// Coach data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    /// Professional license, `CREF-<digits>-<digits>`
    pub license: String,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    #[serde(default)]
    pub sport_id: Option<i64>,
    #[serde(default)]
    pub sport: Option<SportRef>,
    #[serde(default)]
    pub athletes: Vec<AthleteRef>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Reference to a coach embedded in sports and athletes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoachRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sport_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Specialty {
    #[serde(rename = "Physical Preparation")]
    PhysicalPreparation,
    Technical,
    Physiotherapy,
    Nutrition,
}

/// Staging copy of the coach form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoachDraft {
    pub name: String,
    pub license: String,
    pub specialty: Option<Specialty>,
    pub sport_id: Option<i64>,
    pub athletes: Vec<i64>,
    pub photo: Option<PhotoUpload>,
}

fn license_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^CREF-\d+-\d+$").expect("license pattern is valid"))
}

/// Check a license code against `CREF-<digits>-<digits>`
pub fn is_valid_license(license: &str) -> bool {
    license_pattern().is_match(license)
}

impl Coach {
    pub fn sport_id(&self) -> Option<i64> {
        self.sport_id.or_else(|| self.sport.as_ref().map(|s| s.id))
    }

    pub fn to_ref(&self) -> CoachRef {
        CoachRef {
            id: self.id,
            name: self.name.clone(),
            sport_id: self.sport_id(),
        }
    }

    pub fn athlete_ids(&self) -> Vec<i64> {
        self.athletes.iter().map(|a| a.id).collect()
    }

    pub fn draft(&self) -> CoachDraft {
        CoachDraft {
            name: self.name.clone(),
            license: self.license.clone(),
            specialty: self.specialty,
            sport_id: self.sport_id(),
            athletes: self.athlete_ids(),
            photo: None,
        }
    }
}

impl CoachDraft {
    pub fn toggle_athlete(&mut self, athlete_id: i64) {
        if let Some(pos) = self.athletes.iter().position(|id| *id == athlete_id) {
            self.athletes.remove(pos);
        } else {
            self.athletes.push(athlete_id);
        }
    }
}

impl Specialty {
    pub const ALL: [Specialty; 4] = [
        Specialty::PhysicalPreparation,
        Specialty::Technical,
        Specialty::Physiotherapy,
        Specialty::Nutrition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::PhysicalPreparation => "Physical Preparation",
            Specialty::Technical => "Technical",
            Specialty::Physiotherapy => "Physiotherapy",
            Specialty::Nutrition => "Nutrition",
        }
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Specialty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical preparation" | "physical-preparation" => Ok(Specialty::PhysicalPreparation),
            "technical" => Ok(Specialty::Technical),
            "physiotherapy" => Ok(Specialty::Physiotherapy),
            "nutrition" => Ok(Specialty::Nutrition),
            _ => Err(anyhow::anyhow!("Invalid specialty: {}", s)),
        }
    }
}

impl std::fmt::Display for Coach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.license)?;
        if let Some(specialty) = self.specialty {
            write!(f, " [{}]", specialty)?;
        }
        if let Some(sport) = &self.sport {
            write!(f, " - {}", sport.name)?;
        }
        Ok(())
    }
}
