use crate::nutrition::NutrientTargets;

pub fn build_meal_plan_prompt(
    meal_type: &str,
    targets: &NutrientTargets,
    dietary_preferences: Option<&str>,
    description: &str,
) -> String {
    let preferences = dietary_preferences
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("none");
    format!(
        "Generate a single {meal_type} meal plan that meets the following nutrient goals: \
         {targets} and caters to the dietary preferences: {preferences}, which {description}. \
         Include portion sizes for each meal."
    )
}

pub fn build_recipe_ideas_prompt(diet: &str, food_preferences: &str) -> String {
    format!("Generate meal ideas for someone who follows a {diet} diet and prefers {food_preferences}.")
}
