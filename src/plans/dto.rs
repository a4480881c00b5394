use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for meal plan generation.
#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanRequest {
    pub meal_type: MealType,
    pub description: String,
}

/// Request body for recipe ideas.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRequest {
    pub diet: String,
    pub food_preferences: String,
}

/// Generated lines keyed by the requested meal type. Always holds exactly one entry.
pub type GeneratedPlan = BTreeMap<MealType, Vec<String>>;

#[derive(Debug, Serialize)]
pub struct RecipeIdeasResponse {
    pub ideas: Vec<String>,
}
