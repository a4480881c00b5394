use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::profiles::repo_types::{Gender, Profile, ProfileError};

const PROTEIN_G_PER_KG: f64 = 1.8;
const FAT_G_PER_KG: f64 = 0.8;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_CARB: f64 = 4.0;

/// Daily energy and macronutrient targets derived from a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientTargets {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
}

impl fmt::Display for NutrientTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "calories: {:.0} kcal, protein: {:.0} g, fat: {:.0} g, carbohydrates: {:.0} g",
            self.calories, self.protein_g, self.fat_g, self.carbohydrate_g
        )
    }
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(profile: &Profile) -> f64 {
    let (base, w, h, a) = match profile.gender {
        Gender::Male => (88.362, 13.397, 4.799, 5.677),
        Gender::Female => (447.593, 9.247, 3.098, 4.330),
    };
    base + w * profile.weight_kg + h * profile.height_cm - a * f64::from(profile.age)
}

/// Total daily energy expenditure: BMR scaled by activity level.
pub fn total_daily_energy_expenditure(profile: &Profile) -> f64 {
    basal_metabolic_rate(profile) * profile.activity_level.multiplier()
}

pub fn compute_targets(profile: &Profile) -> Result<NutrientTargets, ProfileError> {
    profile.validate()?;

    let calories = total_daily_energy_expenditure(profile);
    let protein_g = profile.weight_kg * PROTEIN_G_PER_KG;
    let fat_g = profile.weight_kg * FAT_G_PER_KG;
    let carbohydrate_g =
        (calories - (protein_g * KCAL_PER_G_PROTEIN + fat_g * KCAL_PER_G_FAT)) / KCAL_PER_G_CARB;

    // Left unclamped; protein and fat already exceed the energy budget here.
    if carbohydrate_g < 0.0 {
        warn!(
            calories,
            carbohydrate_g,
            weight_kg = profile.weight_kg,
            activity_level = %profile.activity_level,
            "negative carbohydrate target"
        );
    }

    Ok(NutrientTargets {
        calories,
        protein_g,
        fat_g,
        carbohydrate_g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::repo_types::ActivityLevel;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn reference_male() -> Profile {
        Profile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::Sedentary,
            dietary_preferences: None,
            allergies: None,
            health_goal: "maintain".into(),
        }
    }

    #[test]
    fn male_reference_bmr_and_tdee() {
        let p = reference_male();
        let bmr = basal_metabolic_rate(&p);
        assert!(approx(bmr, 88.362 + 13.397 * 70.0 + 4.799 * 175.0 - 5.677 * 30.0));
        assert!(approx(bmr, 1695.667));

        let targets = compute_targets(&p).unwrap();
        assert!(approx(targets.calories, bmr * 1.2));
    }

    #[test]
    fn female_branch_uses_female_constants() {
        let p = Profile {
            gender: Gender::Female,
            ..reference_male()
        };
        let expected = 447.593 + 9.247 * 70.0 + 3.098 * 175.0 - 4.330 * 30.0;
        assert!(approx(basal_metabolic_rate(&p), expected));
    }

    #[test]
    fn activity_multiplier_scales_tdee() {
        let mut p = reference_male();
        let bmr = basal_metabolic_rate(&p);
        for (level, m) in [
            (ActivityLevel::LightlyActive, 1.375),
            (ActivityLevel::ModeratelyActive, 1.55),
            (ActivityLevel::VeryActive, 1.725),
            (ActivityLevel::ExtraActive, 1.9),
        ] {
            p.activity_level = level;
            assert!(approx(total_daily_energy_expenditure(&p), bmr * m));
        }
    }

    #[test]
    fn macros_follow_body_weight() {
        let p = Profile {
            weight_kg: 82.5,
            ..reference_male()
        };
        let t = compute_targets(&p).unwrap();
        assert_eq!(t.protein_g, 82.5 * 1.8);
        assert_eq!(t.fat_g, 82.5 * 0.8);
        assert!(approx(
            t.carbohydrate_g,
            (t.calories - (t.protein_g * 4.0 + t.fat_g * 9.0)) / 4.0
        ));
    }

    #[test]
    fn targets_are_deterministic() {
        let p = reference_male();
        assert_eq!(compute_targets(&p).unwrap(), compute_targets(&p).unwrap());
    }

    #[test]
    fn carbohydrates_may_go_negative() {
        let p = Profile {
            age: 90,
            gender: Gender::Female,
            weight_kg: 250.0,
            height_cm: 100.0,
            ..reference_male()
        };
        let t = compute_targets(&p).unwrap();
        assert!(t.carbohydrate_g < 0.0);
    }

    #[test]
    fn rejects_non_positive_measurements() {
        let p = Profile {
            weight_kg: -1.0,
            ..reference_male()
        };
        assert!(matches!(
            compute_targets(&p),
            Err(ProfileError::InvalidProfile { field: "weight", .. })
        ));

        let p = Profile {
            age: 0,
            ..reference_male()
        };
        assert!(compute_targets(&p).is_err());
    }

    #[test]
    fn display_lists_every_macro() {
        let t = compute_targets(&reference_male()).unwrap();
        let s = t.to_string();
        for needle in ["calories", "protein", "fat", "carbohydrates", "kcal"] {
            assert!(s.contains(needle), "{s} missing {needle}");
        }
    }
}
