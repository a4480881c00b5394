use serde::{Deserialize, Serialize};

use crate::nutrition::NutrientTargets;
use crate::profiles::repo_types::{ActivityLevel, Gender, Profile, ProfileError};

/// Raw profile form. Every field arrives as text and is parsed by [`ProfileForm::parse`].
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub activity_level: String,
    #[serde(default)]
    pub dietary_preferences: String,
    #[serde(default)]
    pub allergies: String,
    pub health_goal: String,
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64, ProfileError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ProfileError::invalid(field, format!("{raw:?} is not a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ProfileError::invalid(field, "must be a positive number"));
    }
    Ok(value)
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ProfileForm {
    pub fn parse(&self) -> Result<Profile, ProfileError> {
        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| ProfileError::invalid("age", format!("{:?} is not a whole number", self.age)))?;
        let profile = Profile {
            age,
            gender: self.gender.parse::<Gender>()?,
            weight_kg: parse_positive("weight", &self.weight)?,
            height_cm: parse_positive("height", &self.height)?,
            activity_level: self.activity_level.parse::<ActivityLevel>()?,
            dietary_preferences: optional(&self.dietary_preferences),
            allergies: optional(&self.allergies),
            health_goal: self.health_goal.trim().to_string(),
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub targets: Option<NutrientTargets>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            age: "30".into(),
            gender: "male".into(),
            weight: "70".into(),
            height: "175.5".into(),
            activity_level: "moderately_active".into(),
            dietary_preferences: "  vegetarian ".into(),
            allergies: "".into(),
            health_goal: "lose fat".into(),
        }
    }

    #[test]
    fn parses_well_formed_form() {
        let profile = form().parse().expect("valid form");
        assert_eq!(profile.age, 30);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.height_cm, 175.5);
        assert_eq!(profile.activity_level, ActivityLevel::ModeratelyActive);
        assert_eq!(profile.dietary_preferences.as_deref(), Some("vegetarian"));
        assert_eq!(profile.allergies, None);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let mut f = form();
        f.weight = "seventy".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "weight");

        let mut f = form();
        f.age = "-4".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "age");

        let mut f = form();
        f.height = "0".into();
        assert!(f.parse().is_err());

        let mut f = form();
        f.height = "inf".into();
        assert!(f.parse().is_err());
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let mut f = form();
        f.age = "3000000000".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "age");

        let mut f = form();
        f.weight = "1e308".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "weight");

        let mut f = form();
        f.height = "1200".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "height");
    }

    #[test]
    fn rejects_unknown_activity_level_and_blank_goal() {
        let mut f = form();
        f.activity_level = "hyper_active".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "activity_level");

        let mut f = form();
        f.health_goal = "   ".into();
        let ProfileError::InvalidProfile { field, .. } = f.parse().unwrap_err();
        assert_eq!(field, "health_goal");
    }

    #[test]
    fn response_flattens_profile_fields() {
        let response = ProfileResponse {
            profile: form().parse().unwrap(),
            targets: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["age"], 30);
        assert_eq!(json["activity_level"], "moderately_active");
        assert!(json["targets"].is_null());
    }
}
