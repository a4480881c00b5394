mod calculator;
mod prompts;

pub use calculator::{basal_metabolic_rate, compute_targets, NutrientTargets};
pub use prompts::{build_meal_plan_prompt, build_recipe_ideas_prompt};
