use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Rejected profile input. Carries the offending field so handlers can echo it back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid profile: {field} {reason}")]
    InvalidProfile { field: &'static str, reason: String },
}

impl ProfileError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(ProfileError::invalid(
                "gender",
                format!("must be male or female, got {other:?}"),
            )),
        }
    }
}

/// Daily activity bucket used to scale BMR into TDEE.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" => Ok(ActivityLevel::ExtraActive),
            other => Err(ProfileError::invalid(
                "activity_level",
                format!("unrecognized level {other:?}"),
            )),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated nutrition profile of a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub health_goal: String,
}

const MAX_AGE: u32 = 150;
const MAX_WEIGHT_KG: f64 = 1000.0;
const MAX_HEIGHT_CM: f64 = 300.0;

impl Profile {
    /// Checks the numeric invariants the calculator relies on.
    ///
    /// Values outside plausible human ranges are rejected so derived targets stay finite
    /// and the age fits the `INTEGER` column.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(1..=MAX_AGE).contains(&self.age) {
            return Err(ProfileError::invalid(
                "age",
                format!("must be between 1 and {MAX_AGE}"),
            ));
        }
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            return Err(ProfileError::invalid(
                "weight",
                format!("must be a positive number up to {MAX_WEIGHT_KG} kg"),
            ));
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0 && self.height_cm <= MAX_HEIGHT_CM) {
            return Err(ProfileError::invalid(
                "height",
                format!("must be a positive number up to {MAX_HEIGHT_CM} cm"),
            ));
        }
        if self.health_goal.trim().is_empty() {
            return Err(ProfileError::invalid("health_goal", "is required"));
        }
        Ok(())
    }
}

/// Profile record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub age: i32,
    pub gender: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: String,
    pub dietary_preferences: Option<String>,
    pub allergies: Option<String>,
    pub health_goal: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = ProfileError;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        let age = u32::try_from(r.age).map_err(|_| ProfileError::invalid("age", "must be positive"))?;
        let profile = Profile {
            age,
            gender: r.gender.parse()?,
            weight_kg: r.weight_kg,
            height_cm: r.height_cm,
            activity_level: r.activity_level.parse()?,
            dietary_preferences: r.dietary_preferences,
            allergies: r.allergies,
            health_goal: r.health_goal,
        };
        profile.validate()?;
        Ok(profile)
    }
}
