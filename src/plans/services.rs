use tracing::{debug, info};

use crate::completion::{CompletionClient, CompletionError, CompletionRequest};
use crate::nutrition::{build_meal_plan_prompt, build_recipe_ideas_prompt, compute_targets};
use crate::plans::dto::{GeneratedPlan, MealPlanRequest};
use crate::profiles::repo_types::{Profile, ProfileError};

const MEAL_PLAN_MAX_TOKENS: u32 = 200;
const RECIPE_IDEAS_MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.8;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Splits completion text into trimmed, non-empty lines.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn generate_meal_plan(
    client: &dyn CompletionClient,
    profile: &Profile,
    request: &MealPlanRequest,
) -> Result<GeneratedPlan, GenerationError> {
    let targets = compute_targets(profile)?;
    let prompt = build_meal_plan_prompt(
        request.meal_type.as_str(),
        &targets,
        profile.dietary_preferences.as_deref(),
        &request.description,
    );
    debug!(meal_type = %request.meal_type, prompt_len = prompt.len(), "meal plan prompt built");

    let raw = client
        .complete(CompletionRequest {
            prompt,
            max_tokens: MEAL_PLAN_MAX_TOKENS,
            temperature: TEMPERATURE,
            samples: 1,
        })
        .await?;

    let lines = split_lines(&raw);
    info!(meal_type = %request.meal_type, lines = lines.len(), "meal plan generated");
    Ok(GeneratedPlan::from([(request.meal_type, lines)]))
}

pub async fn generate_recipe_ideas(
    client: &dyn CompletionClient,
    diet: &str,
    food_preferences: &str,
) -> Result<Vec<String>, GenerationError> {
    let prompt = build_recipe_ideas_prompt(diet, food_preferences);
    let raw = client
        .complete(CompletionRequest {
            prompt,
            max_tokens: RECIPE_IDEAS_MAX_TOKENS,
            temperature: TEMPERATURE,
            samples: 1,
        })
        .await?;

    let ideas = split_lines(&raw);
    info!(ideas = ideas.len(), "recipe ideas generated");
    Ok(ideas)
}
