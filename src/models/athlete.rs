use serde::{Deserialize, Serialize};

use super::{CoachRef, PhotoUpload, SportRef};

/// Youngest age offered by the athlete form
pub const MIN_AGE: u32 = 16;
/// Oldest age offered by the athlete form
pub const MAX_AGE: u32 = 50;

/// Athlete data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Athlete {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sport_id: Option<i64>,
    #[serde(default)]
    pub sport: Option<SportRef>,
    #[serde(default)]
    pub coaches: Vec<CoachRef>,
    /// Storage path of the uploaded photo
    #[serde(default)]
    pub photo: Option<String>,
    /// Fully resolved photo URL, possibly a `data:` URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Reference to an athlete embedded in sports and coaches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AthleteRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sport_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    Juvenile,
    Adult,
    Master,
    Professional,
}

/// Staging copy of the athlete form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteDraft {
    pub name: String,
    pub age: Option<u32>,
    pub category: Option<Category>,
    pub sport_id: Option<i64>,
    pub coaches: Vec<i64>,
    /// New photo; `None` keeps the current one
    pub photo: Option<PhotoUpload>,
}

impl Athlete {
    /// Sport id, taken from the embedded sport when the flat field is absent
    pub fn sport_id(&self) -> Option<i64> {
        self.sport_id.or_else(|| self.sport.as_ref().map(|s| s.id))
    }

    pub fn to_ref(&self) -> AthleteRef {
        AthleteRef {
            id: self.id,
            name: self.name.clone(),
            sport_id: self.sport_id(),
        }
    }

    pub fn coach_ids(&self) -> Vec<i64> {
        self.coaches.iter().map(|c| c.id).collect()
    }

    /// Seed an edit draft from the current values
    pub fn draft(&self) -> AthleteDraft {
        AthleteDraft {
            name: self.name.clone(),
            age: self.age,
            category: self.category,
            sport_id: self.sport_id(),
            coaches: self.coach_ids(),
            photo: None,
        }
    }
}

impl AthleteDraft {
    /// Add the coach when unselected, remove it otherwise
    pub fn toggle_coach(&mut self, coach_id: i64) {
        if let Some(pos) = self.coaches.iter().position(|id| *id == coach_id) {
            self.coaches.remove(pos);
        } else {
            self.coaches.push(coach_id);
        }
    }
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Juvenile,
        Category::Adult,
        Category::Master,
        Category::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Juvenile => "Juvenile",
            Category::Adult => "Adult",
            Category::Master => "Master",
            Category::Professional => "Professional",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "juvenile" => Ok(Category::Juvenile),
            "adult" => Ok(Category::Adult),
            "master" => Ok(Category::Master),
            "professional" => Ok(Category::Professional),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

impl std::fmt::Display for Athlete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
        if let Some(age) = self.age {
            write!(f, ", {} years", age)?;
        }
        if let Some(category) = self.category {
            write!(f, " [{}]", category)?;
        }
        if let Some(sport) = &self.sport {
            write!(f, " - {}", sport.name)?;
        }
        Ok(())
    }
}
